use core::marker::PhantomData;

use crate::{ConfigError, Error, NodeField, Result, Snowflake, TimeSource, resolve_epoch};

/// The immutable half of a generator: node coordinates and epoch, validated
/// against the layout of `ID`.
pub(crate) struct Node<ID: Snowflake> {
    pub(crate) datacenter_id: u64,
    pub(crate) worker_id: u64,
    pub(crate) epoch: i64,
    _id: PhantomData<fn() -> ID>,
}

impl<ID: Snowflake> Node<ID> {
    pub(crate) fn new(datacenter_id: i64, worker_id: i64, epoch: Option<i64>) -> Result<Self> {
        let worker_id = check_range(NodeField::WorkerId, worker_id, ID::MAX_WORKER_ID)?;
        let datacenter_id =
            check_range(NodeField::DatacenterId, datacenter_id, ID::MAX_DATACENTER_ID)?;
        Ok(Self {
            datacenter_id,
            worker_id,
            epoch: resolve_epoch(epoch),
            _id: PhantomData,
        })
    }

    /// Packs `now` and `sequence` with this node's coordinates.
    ///
    /// Fails without side effects if `now` cannot be represented, so callers
    /// compose before committing any state.
    #[inline]
    pub(crate) fn compose(&self, now: i64, sequence: u64) -> Result<ID> {
        let delta = now
            .checked_sub(self.epoch)
            .and_then(|delta| u64::try_from(delta).ok())
            .filter(|delta| *delta <= ID::MAX_TIMESTAMP)
            .ok_or_else(|| self.cold_out_of_range(now))?;
        Ok(ID::from_components(
            delta,
            self.datacenter_id,
            self.worker_id,
            sequence,
        ))
    }

    #[cold]
    #[inline(never)]
    fn cold_out_of_range(&self, now: i64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::error!(now, epoch = self.epoch, "clock outside the timestamp range");
        Error::TimestampOutOfRange {
            timestamp: now,
            epoch: self.epoch,
            max: ID::MAX_TIMESTAMP,
        }
    }
}

fn check_range(field: NodeField, value: i64, max: u64) -> Result<u64, ConfigError> {
    match u64::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(ConfigError::OutOfRange { field, value, max }),
    }
}

/// Spins until `time` reads strictly later than `last_timestamp` and returns
/// that reading.
///
/// Only called once a millisecond's sequence space is used up. The wait is
/// expected to be well under a millisecond, so the loop polls without
/// sleeping or yielding; parking the thread would cost more than it saves.
#[cold]
#[inline(never)]
pub(crate) fn spin_until_after<T: TimeSource>(time: &T, last_timestamp: i64) -> i64 {
    #[cfg(feature = "tracing")]
    tracing::debug!(last_timestamp, "sequence exhausted, waiting for next millisecond");
    loop {
        let now = time.current_millis();
        if now > last_timestamp {
            return now;
        }
        core::hint::spin_loop();
    }
}

/// Error for a clock reading `now` behind `last_timestamp`.
#[cold]
#[inline(never)]
pub(crate) fn clock_behind(now: i64, last_timestamp: i64) -> Error {
    // Saturates when the clock reads near `i64::MIN`.
    let millis = last_timestamp.saturating_sub(now);
    debug_assert!(millis > 0);
    #[cfg(feature = "tracing")]
    tracing::warn!(now, last_timestamp, millis, "clock moved backwards");
    Error::ClockMovedBackwards { millis }
}
