//! Error types for Snowflake ID generation.
//!
//! ## Error Cases
//! - `Configuration`: a node coordinate is missing or outside its field width.
//!   Raised at construction; no generator is produced.
//! - `ClockMovedBackwards`: the time source reported a time earlier than the
//!   last issued ID. The generator state is left untouched.
//! - `TimestampOutOfRange`: the clock is before the epoch or past the last
//!   millisecond the timestamp field can represent.
//! - `LockPoisoned`: a thread panicked while holding the generator lock (std
//!   mutex only).
//! - `Parse` / `ReservedBitSet`: a value could not be read back as an ID.

use core::num::ParseIntError;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Which node coordinate a [`ConfigError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeField {
    DatacenterId,
    WorkerId,
}

impl NodeField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DatacenterId => "datacenter-id",
            Self::WorkerId => "worker-id",
        }
    }
}

impl core::fmt::Display for NodeField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid node configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required node coordinate was not supplied.
    #[error("{field} must not be null")]
    Missing { field: NodeField },

    /// A node coordinate is negative or does not fit its bit field.
    #[error("{field} can't be greater than {max} or less than 0 (got {value})")]
    OutOfRange {
        field: NodeField,
        value: i64,
        max: u64,
    },
}

/// All errors `flakeid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// `millis` is how far the clock is behind the last issued timestamp.
    #[error("clock moved backwards; refusing to generate id for {millis} milliseconds")]
    ClockMovedBackwards { millis: i64 },

    #[error("timestamp {timestamp} is outside the representable range for epoch {epoch} (max delta {max})")]
    TimestampOutOfRange { timestamp: i64, epoch: i64, max: u64 },

    /// Another thread panicked while holding the generator lock.
    ///
    /// `parking_lot` mutexes do not poison, so this variant only exists with
    /// the std mutex.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,

    #[error("invalid id: {0}")]
    Parse(#[from] ParseIntError),

    /// The value has the reserved sign bit set and cannot be a Snowflake ID.
    #[error("invalid id {raw}: reserved bit is set")]
    ReservedBitSet { raw: u64 },
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = Error::from(ConfigError::OutOfRange {
            field: NodeField::WorkerId,
            value: 32,
            max: 31,
        });
        assert_eq!(
            err.to_string(),
            "invalid configuration: worker-id can't be greater than 31 or less than 0 (got 32)"
        );

        let err = Error::from(ConfigError::Missing {
            field: NodeField::DatacenterId,
        });
        assert_eq!(
            err.to_string(),
            "invalid configuration: datacenter-id must not be null"
        );
    }

    #[test]
    fn clock_message_carries_magnitude() {
        let err = Error::ClockMovedBackwards { millis: 5 };
        assert_eq!(
            err.to_string(),
            "clock moved backwards; refusing to generate id for 5 milliseconds"
        );
    }
}
