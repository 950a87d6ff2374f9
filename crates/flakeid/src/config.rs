use crate::{
    ConfigError, DEFAULT_EPOCH, NodeField, Result, Snowflake, SnowflakeGenerator, TimeSource,
};

/// Returns `epoch` if it is present and non-negative, [`DEFAULT_EPOCH`]
/// otherwise.
///
/// Defaulting is a silent correction, never an error.
pub const fn resolve_epoch(epoch: Option<i64>) -> i64 {
    match epoch {
        Some(epoch) if epoch >= 0 => epoch,
        _ => DEFAULT_EPOCH,
    }
}

/// Node settings as bound from an external source (files, environment,
/// flags), before validation.
///
/// Every field is optional at this layer so that a missing coordinate is
/// reported as [`ConfigError::Missing`] instead of a deserialization failure.
/// With the `serde` feature, keys are kebab-case:
///
/// ```json
/// { "datacenter-id": 1, "worker-id": 7, "epoch": 1735689600000 }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", deny_unknown_fields))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnowflakeConfig {
    pub datacenter_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub epoch: Option<i64>,
}

impl SnowflakeConfig {
    /// Checks that both node coordinates are present and fills in the epoch.
    ///
    /// Range checks are left to the generator, which knows its layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent coordinate.
    pub fn validate(&self) -> Result<NodeConfig, ConfigError> {
        let datacenter_id = self.datacenter_id.ok_or(ConfigError::Missing {
            field: NodeField::DatacenterId,
        })?;
        let worker_id = self.worker_id.ok_or(ConfigError::Missing {
            field: NodeField::WorkerId,
        })?;
        Ok(NodeConfig::new(datacenter_id, worker_id, self.epoch))
    }
}

/// Bound node settings: both coordinates present and the epoch resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeConfig {
    pub datacenter_id: i64,
    pub worker_id: i64,
    pub epoch: i64,
}

impl NodeConfig {
    pub const fn new(datacenter_id: i64, worker_id: i64, epoch: Option<i64>) -> Self {
        Self {
            datacenter_id,
            worker_id,
            epoch: resolve_epoch(epoch),
        }
    }

    /// Builds a generator for these settings.
    ///
    /// # Example
    ///
    /// ```
    /// use flakeid::{LockSnowflakeGenerator, NodeConfig, SnowflakeId, SystemClock};
    ///
    /// let generator: LockSnowflakeGenerator<SnowflakeId, _> =
    ///     NodeConfig::new(1, 2, None).build(SystemClock).unwrap();
    /// assert_eq!(generator.worker_id(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a coordinate is out of range for
    /// the layout of `ID`.
    ///
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn build<G, ID, T>(&self, time: T) -> Result<G>
    where
        G: SnowflakeGenerator<ID, T>,
        ID: Snowflake,
        T: TimeSource,
    {
        G::from_config(self, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, LockSnowflakeGenerator, SnowflakeId, SystemClock};

    #[test]
    fn missing_coordinates_fail_closed() {
        let config = SnowflakeConfig {
            datacenter_id: None,
            worker_id: Some(1),
            epoch: None,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                field: NodeField::DatacenterId
            })
        );

        let config = SnowflakeConfig {
            datacenter_id: Some(1),
            worker_id: None,
            epoch: None,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing {
                field: NodeField::WorkerId
            })
        );
    }

    #[test]
    fn epoch_defaults_when_absent_or_negative() {
        assert_eq!(resolve_epoch(None), DEFAULT_EPOCH);
        assert_eq!(resolve_epoch(Some(-1)), DEFAULT_EPOCH);
        assert_eq!(resolve_epoch(Some(0)), 0);
        assert_eq!(resolve_epoch(Some(42)), 42);

        let node = SnowflakeConfig {
            datacenter_id: Some(3),
            worker_id: Some(4),
            epoch: Some(-500),
        }
        .validate()
        .unwrap();
        assert_eq!(
            node,
            NodeConfig {
                datacenter_id: 3,
                worker_id: 4,
                epoch: DEFAULT_EPOCH
            }
        );
    }

    #[test]
    fn build_revalidates_ranges() {
        let node = NodeConfig::new(32, 0, None);
        let result: Result<LockSnowflakeGenerator<SnowflakeId, _>> = node.build(SystemClock);
        assert!(matches!(
            result,
            Err(Error::Configuration(ConfigError::OutOfRange {
                field: NodeField::DatacenterId,
                value: 32,
                max: 31
            }))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn binds_kebab_case_keys() {
        let config: SnowflakeConfig =
            serde_json::from_str(r#"{"datacenter-id": 1, "worker-id": 7}"#).unwrap();
        assert_eq!(
            config,
            SnowflakeConfig {
                datacenter_id: Some(1),
                worker_id: Some(7),
                epoch: None,
            }
        );

        let config: SnowflakeConfig = serde_json::from_str(r#"{"worker-id": 7}"#).unwrap();
        assert!(config.validate().is_err());
    }
}
