/// A macro for defining a Snowflake ID layout backed by a `u64`.
///
/// The reserved sign bit is implicit; the four field widths must add up to
/// the remaining 63 bits or the crate defining the layout fails to compile.
///
/// ```text
///  Bit Index:  63   62 ......... S+W+D   ...   S+W   ...   S   ...   0
///              +----+-----------------+-----------+----------+----------+
///  Field:      | 0  | timestamp (T)   | dc (D)    | worker (W)| seq (S) |
///              +----+-----------------+-----------+----------+----------+
/// ```
///
/// ## Example
///
/// ```
/// use flakeid::{Snowflake, define_snowflake_id};
///
/// define_snowflake_id!(
///     /// 42 bits of time, 256 nodes, 1024 IDs per millisecond.
///     WideClockId,
///     timestamp: 42,
///     datacenter: 4,
///     worker: 4,
///     sequence: 13
/// );
///
/// let id = WideClockId::from(5, 1, 2, 3);
/// assert_eq!(id.timestamp(), 5);
/// assert_eq!(WideClockId::MAX_WORKER_ID, 15);
/// ```
#[macro_export]
macro_rules! define_snowflake_id {
    (
        $(#[$meta:meta])*
        $name:ident,
        timestamp: $timestamp_bits:expr,
        datacenter: $datacenter_bits:expr,
        worker: $worker_bits:expr,
        sequence: $sequence_bits:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            id: u64,
        }

        const _: () = {
            // One reserved bit plus the four fields must fill the u64 exactly.
            assert!(
                1 + $timestamp_bits + $datacenter_bits + $worker_bits + $sequence_bits == u64::BITS,
                "Snowflake layout must use exactly 63 bits after the reserved sign bit"
            );
        };

        impl $name {
            pub const fn from(
                timestamp: u64,
                datacenter_id: u64,
                worker_id: u64,
                sequence: u64,
            ) -> Self {
                let t = (timestamp & <Self as $crate::Snowflake>::MAX_TIMESTAMP)
                    << <Self as $crate::Snowflake>::TIMESTAMP_SHIFT;
                let d = (datacenter_id & <Self as $crate::Snowflake>::MAX_DATACENTER_ID)
                    << <Self as $crate::Snowflake>::DATACENTER_ID_SHIFT;
                let w = (worker_id & <Self as $crate::Snowflake>::MAX_WORKER_ID)
                    << <Self as $crate::Snowflake>::WORKER_ID_SHIFT;
                let s = (sequence & <Self as $crate::Snowflake>::MAX_SEQUENCE)
                    << <Self as $crate::Snowflake>::SEQUENCE_SHIFT;
                Self { id: t | d | w | s }
            }
        }

        impl $crate::Snowflake for $name {
            const TIMESTAMP_BITS: u32 = $timestamp_bits;
            const DATACENTER_ID_BITS: u32 = $datacenter_bits;
            const WORKER_ID_BITS: u32 = $worker_bits;
            const SEQUENCE_BITS: u32 = $sequence_bits;

            fn from_components(
                timestamp: u64,
                datacenter_id: u64,
                worker_id: u64,
                sequence: u64,
            ) -> Self {
                debug_assert!(timestamp <= Self::MAX_TIMESTAMP, "timestamp overflow");
                debug_assert!(datacenter_id <= Self::MAX_DATACENTER_ID, "datacenter_id overflow");
                debug_assert!(worker_id <= Self::MAX_WORKER_ID, "worker_id overflow");
                debug_assert!(sequence <= Self::MAX_SEQUENCE, "sequence overflow");
                Self::from(timestamp, datacenter_id, worker_id, sequence)
            }

            fn from_raw(raw: u64) -> Self {
                Self { id: raw }
            }

            fn to_raw(&self) -> u64 {
                self.id
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.id)
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                use $crate::Snowflake as _;
                f.debug_struct(stringify!($name))
                    .field("id", &self.id)
                    .field("timestamp", &self.timestamp())
                    .field("datacenter_id", &self.datacenter_id())
                    .field("worker_id", &self.worker_id())
                    .field("sequence", &self.sequence())
                    .finish()
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::Error;

            /// Parses the decimal form produced by `Display`.
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let raw: u64 = s.parse()?;
                <Self as ::core::convert::TryFrom<u64>>::try_from(raw)
            }
        }

        impl ::core::convert::TryFrom<u64> for $name {
            type Error = $crate::Error;

            fn try_from(raw: u64) -> ::core::result::Result<Self, Self::Error> {
                let id = Self { id: raw };
                if $crate::Snowflake::is_valid(&id) {
                    Ok(id)
                } else {
                    Err($crate::Error::ReservedBitSet { raw })
                }
            }
        }

        impl ::core::convert::TryFrom<i64> for $name {
            type Error = $crate::Error;

            fn try_from(raw: i64) -> ::core::result::Result<Self, Self::Error> {
                <Self as ::core::convert::TryFrom<u64>>::try_from(raw as u64)
            }
        }

        impl ::core::convert::From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.id as i64
            }
        }

        impl ::core::convert::From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.id
            }
        }
    };
}

define_snowflake_id!(
    /// A 64-bit Snowflake ID using the classic Twitter-style node split.
    ///
    /// - 1 bit reserved
    /// - 41 bits timestamp (ms since the generator's epoch, ~69 years)
    /// - 5 bits datacenter ID
    /// - 5 bits worker ID
    /// - 12 bits sequence
    ///
    /// ```text
    ///  Bit Index:  63           63 62            22 21          17 16      12 11             0
    ///              +--------------+----------------+--------------+----------+---------------+
    ///  Field:      | reserved (1) | timestamp (41) | datacenter(5)| worker(5)| sequence (12) |
    ///              +--------------+----------------+--------------+----------+---------------+
    ///              |<------------------- MSB ------- 64 bits ------- LSB ------------------->|
    /// ```
    SnowflakeId,
    timestamp: 41,
    datacenter: 5,
    worker: 5,
    sequence: 12
);
