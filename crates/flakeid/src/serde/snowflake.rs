use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SnowflakeId;

/// Serde adapter encoding an ID as a signed 64-bit integer.
///
/// Use with `#[serde(with = "flakeid::as_native")]`.
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::{SerdeError, Snowflake};

    /// Serialize a Snowflake ID as its `i64` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Snowflake,
        S: Serializer,
    {
        id.to_i64().serialize(s)
    }

    /// Deserialize a Snowflake ID from an `i64` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value is
    /// negative (reserved bit set).
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Snowflake,
        D: Deserializer<'de>,
    {
        let n = i64::deserialize(d)?;
        let id = ID::from_raw(n as u64);
        if !id.is_valid() {
            return Err(serde::de::Error::custom(SerdeError::DecodeOverflow { id }));
        }
        Ok(id)
    }
}

/// Serde adapter encoding an ID as a decimal string.
///
/// JSON consumers that parse numbers as doubles (JavaScript) lose precision
/// above 2^53; a string keeps every digit.
///
/// Use with `#[serde(with = "flakeid::as_string")]`.
pub mod as_string {
    use super::{Deserializer, Serializer};
    use crate::{SerdeError, Snowflake};

    /// Serialize a Snowflake ID as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Snowflake,
        S: Serializer,
    {
        s.collect_str(&id.to_i64())
    }

    /// Deserialize a Snowflake ID from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a decimal integer
    /// - The value has the reserved bit set
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Snowflake,
        D: Deserializer<'de>,
    {
        struct DecimalVisitor<ID>(core::marker::PhantomData<ID>);

        impl<ID: Snowflake> serde::de::Visitor<'_> for DecimalVisitor<ID> {
            type Value = ID;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a decimal snowflake id string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let raw: u64 = v.parse().map_err(E::custom)?;
                let id = ID::from_raw(raw);
                if !id.is_valid() {
                    return Err(E::custom(SerdeError::DecodeOverflow { id }));
                }
                Ok(id)
            }
        }

        d.deserialize_str(DecimalVisitor(core::marker::PhantomData))
    }
}

impl Serialize for SnowflakeId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        as_native::serialize(self, s)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        as_native::deserialize(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SerdeError, Snowflake};
    use serde_json::json;

    #[test]
    fn native_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_native")]
            event_id: SnowflakeId,
        }
        let row = Row {
            event_id: SnowflakeId::from_raw(42),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":42}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn native_rejects_negative() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_native")]
            event_id: SnowflakeId,
        }
        let err = serde_json::from_value::<Row>(json!({"event_id": -1})).expect_err("should fail");
        assert_eq!(
            err.to_string(),
            SerdeError::DecodeOverflow {
                id: SnowflakeId::from_raw(u64::MAX)
            }
            .to_string()
        );
    }

    #[test]
    fn string_roundtrip_keeps_all_digits() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_string")]
            event_id: SnowflakeId,
        }
        let row = Row {
            event_id: SnowflakeId::from_components(SnowflakeId::MAX_TIMESTAMP, 31, 31, 4095),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, format!(r#"{{"event_id":"{}"}}"#, i64::MAX));
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn string_rejects_reserved_bit_and_garbage() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_string")]
            event_id: SnowflakeId,
        }
        let overflow = (1u64 << 63).to_string();
        assert!(serde_json::from_value::<Row>(json!({ "event_id": overflow })).is_err());
        assert!(serde_json::from_value::<Row>(json!({"event_id": "12ab"})).is_err());
        assert!(serde_json::from_value::<Row>(json!({"event_id": 12})).is_err());
    }

    #[test]
    fn plain_derive_uses_integer_form() {
        let id = SnowflakeId::from_components(1, 2, 3, 4);
        let value = serde_json::to_value(id).unwrap();
        assert_eq!(value, json!(id.to_i64()));
        let back: SnowflakeId = serde_json::from_value(value).unwrap();
        assert_eq!(back, id);
    }
}
