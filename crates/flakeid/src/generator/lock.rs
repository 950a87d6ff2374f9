use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result, Snowflake, SnowflakeGenerator, TimeSource,
    generator::{Mutex, Node, clock_behind, spin_until_after},
};

/// `lastTimestamp` value meaning no ID has been issued yet.
const NO_TIMESTAMP: i64 = -1;

#[derive(Debug)]
struct State {
    last_timestamp: i64,
    sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The mutable state (last timestamp, sequence) sits behind a single mutex.
/// The whole read-clock, compare, wait, update and compose step runs while
/// the lock is held, so no interleaving of callers can produce a duplicate or
/// decreasing ID. Share it across threads with an [`Arc`].
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Any [`Snowflake`] layout
/// - ✅ Fair access across threads (with `parking-lot`)
///
/// ## See Also
/// - [`AtomicSnowflakeGenerator`]
///
/// [`Arc`]: std::sync::Arc
/// [`AtomicSnowflakeGenerator`]: crate::AtomicSnowflakeGenerator
pub struct LockSnowflakeGenerator<ID, T>
where
    ID: Snowflake,
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    node: Node<ID>,
    time: T,
}

impl<ID, T> LockSnowflakeGenerator<ID, T>
where
    ID: Snowflake,
    T: TimeSource,
{
    /// Creates a new [`LockSnowflakeGenerator`] for one node.
    ///
    /// # Parameters
    ///
    /// - `datacenter_id`: must be in `0..=ID::MAX_DATACENTER_ID`
    /// - `worker_id`: must be in `0..=ID::MAX_WORKER_ID`
    /// - `epoch`: Unix milliseconds subtracted from every timestamp. `None`
    ///   or a negative value selects [`DEFAULT_EPOCH`].
    /// - `time`: the [`TimeSource`] read on every call
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either coordinate is out of range.
    ///
    /// # Example
    /// ```
    /// use flakeid::{LockSnowflakeGenerator, MonotonicClock, Snowflake, SnowflakeId};
    ///
    /// let generator = LockSnowflakeGenerator::<SnowflakeId, _>::new(1, 7, None, MonotonicClock::new())?;
    ///
    /// let id = generator.next_id()?;
    /// assert_eq!(id.datacenter_id(), 1);
    /// assert_eq!(id.worker_id(), 7);
    /// # Ok::<(), flakeid::Error>(())
    /// ```
    ///
    /// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn new(datacenter_id: i64, worker_id: i64, epoch: Option<i64>, time: T) -> Result<Self> {
        let node = Node::new(datacenter_id, worker_id, epoch)?;
        let state = Mutex::new(State {
            last_timestamp: NO_TIMESTAMP,
            sequence: 0,
        });
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
            node,
            time,
        })
    }

    /// Generates the next ID.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackwards`] if the clock reads earlier than the
    ///   last issued ID; state is left as it was
    /// - [`Error::TimestampOutOfRange`] if the clock cannot be encoded
    /// - [`Error::LockPoisoned`] if another caller panicked mid-generation
    ///   (std mutex only)
    ///
    /// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
    /// [`Error::TimestampOutOfRange`]: crate::Error::TimestampOutOfRange
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<ID> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let mut now = self.time.current_millis();
        let sequence = match now.cmp(&state.last_timestamp) {
            Ordering::Less => return Err(clock_behind(now, state.last_timestamp)),
            Ordering::Equal => {
                let sequence = (state.sequence + 1) & ID::MAX_SEQUENCE;
                if sequence == 0 {
                    now = spin_until_after(&self.time, state.last_timestamp);
                }
                sequence
            }
            Ordering::Greater => 0,
        };

        let id = self.node.compose(now, sequence)?;
        state.last_timestamp = now;
        state.sequence = sequence;
        Ok(id)
    }

    pub fn datacenter_id(&self) -> u64 {
        self.node.datacenter_id
    }

    pub fn worker_id(&self) -> u64 {
        self.node.worker_id
    }

    pub fn epoch(&self) -> i64 {
        self.node.epoch
    }
}

impl<ID, T> SnowflakeGenerator<ID, T> for LockSnowflakeGenerator<ID, T>
where
    ID: Snowflake,
    T: TimeSource,
{
    fn new(datacenter_id: i64, worker_id: i64, epoch: Option<i64>, time: T) -> Result<Self> {
        Self::new(datacenter_id, worker_id, epoch, time)
    }

    fn next_id(&self) -> Result<ID> {
        self.next_id()
    }

    fn datacenter_id(&self) -> u64 {
        self.datacenter_id()
    }

    fn worker_id(&self) -> u64 {
        self.worker_id()
    }

    fn epoch(&self) -> i64 {
        self.epoch()
    }
}
