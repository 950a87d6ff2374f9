use crate::{NodeConfig, Result, Snowflake, TimeSource};

/// A minimal interface for generating Snowflake IDs.
///
/// Every implementation serializes [`SnowflakeGenerator::next_id`] so that
/// concurrent callers receive distinct, strictly increasing IDs.
pub trait SnowflakeGenerator<ID, T>
where
    ID: Snowflake,
    T: TimeSource,
{
    /// Creates a new generator for the node `(datacenter_id, worker_id)`.
    ///
    /// A missing or negative `epoch` falls back to [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either coordinate is negative or
    /// exceeds the maximum its bit field allows.
    ///
    /// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
    /// [`Error::Configuration`]: crate::Error::Configuration
    fn new(datacenter_id: i64, worker_id: i64, epoch: Option<i64>, time: T) -> Result<Self>
    where
        Self: Sized;

    /// Creates a new generator from bound configuration.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::new`].
    fn from_config(config: &NodeConfig, time: T) -> Result<Self>
    where
        Self: Sized,
    {
        Self::new(
            config.datacenter_id,
            config.worker_id,
            Some(config.epoch),
            time,
        )
    }

    /// Generates the next ID.
    ///
    /// If the current millisecond's sequence space is exhausted, this spins
    /// on the time source until the millisecond advances. The wait has no
    /// timeout; it ends when the clock moves.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackwards`] if the time source reads earlier than
    ///   the last issued ID. The generator state is unchanged.
    /// - [`Error::TimestampOutOfRange`] if the time is before the epoch or
    ///   too far past it for the timestamp field.
    /// - [`Error::LockPoisoned`] for lock-based generators using the std
    ///   mutex.
    ///
    /// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
    /// [`Error::TimestampOutOfRange`]: crate::Error::TimestampOutOfRange
    /// [`Error::LockPoisoned`]: crate::Error
    fn next_id(&self) -> Result<ID>;

    fn datacenter_id(&self) -> u64;

    fn worker_id(&self) -> u64;

    /// The epoch in Unix milliseconds, after defaulting.
    fn epoch(&self) -> i64;
}
