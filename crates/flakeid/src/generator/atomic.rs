use core::cmp::Ordering as CmpOrdering;

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result, Snowflake, SnowflakeGenerator, TimeSource,
    generator::{Node, clock_behind, spin_until_after},
};

/// Stored before the first ID. The sign bit is set, so no valid ID can
/// collide with it.
const NO_ID: u64 = u64::MAX;

/// A lock-free Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The last issued ID is kept in a single [`AtomicU64`]; since it already
/// packs the timestamp and sequence, it is the whole mutable state. Each call
/// loads it, reads the clock, computes the successor and publishes it with a
/// compare-and-swap, retrying if another caller got there first.
///
/// The state is loaded *before* the clock is read. A lost race therefore
/// shows up as a failed CAS and a retry, never as a spurious backward-clock
/// error, provided the time source itself is monotonic across threads.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Any [`Snowflake`] layout
/// - ❌ No fairness: under heavy contention a caller may retry many times
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
pub struct AtomicSnowflakeGenerator<ID, T>
where
    ID: Snowflake,
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    node: Node<ID>,
    time: T,
}

impl<ID, T> AtomicSnowflakeGenerator<ID, T>
where
    ID: Snowflake,
    T: TimeSource,
{
    /// Creates a new [`AtomicSnowflakeGenerator`] for one node.
    ///
    /// Parameters and validation are the same as
    /// [`LockSnowflakeGenerator::new`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either coordinate is out of range.
    ///
    /// # Example
    /// ```
    /// use flakeid::{AtomicSnowflakeGenerator, Snowflake, SnowflakeId, SystemClock};
    ///
    /// let generator = AtomicSnowflakeGenerator::<SnowflakeId, _>::new(0, 3, None, SystemClock)?;
    /// let a = generator.next_id()?;
    /// let b = generator.next_id()?;
    /// assert!(a < b);
    /// # Ok::<(), flakeid::Error>(())
    /// ```
    ///
    /// [`LockSnowflakeGenerator::new`]: crate::LockSnowflakeGenerator::new
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn new(datacenter_id: i64, worker_id: i64, epoch: Option<i64>, time: T) -> Result<Self> {
        let node = Node::new(datacenter_id, worker_id, epoch)?;
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(NO_ID)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(NO_ID),
            node,
            time,
        })
    }

    /// Generates the next ID.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackwards`] if the clock reads earlier than the
    ///   last issued ID
    /// - [`Error::TimestampOutOfRange`] if the clock cannot be encoded
    ///
    /// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
    /// [`Error::TimestampOutOfRange`]: crate::Error::TimestampOutOfRange
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<ID> {
        loop {
            let current_raw = self.state.load(Ordering::Acquire);
            let mut now = self.time.current_millis();

            let sequence = if current_raw == NO_ID {
                0
            } else {
                let current = ID::from_raw(current_raw);
                let last_timestamp = current.unix_millis(self.node.epoch);
                match now.cmp(&last_timestamp) {
                    CmpOrdering::Less => return Err(clock_behind(now, last_timestamp)),
                    CmpOrdering::Equal => {
                        let sequence = (current.sequence() + 1) & ID::MAX_SEQUENCE;
                        if sequence == 0 {
                            now = spin_until_after(&self.time, last_timestamp);
                        }
                        sequence
                    }
                    CmpOrdering::Greater => 0,
                }
            };

            let next = self.node.compose(now, sequence)?;
            if self
                .state
                .compare_exchange_weak(
                    current_raw,
                    next.to_raw(),
                    Ordering::AcqRel,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return Ok(next);
            }
            // Another caller won the race; start over from its ID.
            core::hint::spin_loop();
        }
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

impl<ID, T> SnowflakeGenerator<ID, T> for AtomicSnowflakeGenerator<ID, T>
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
