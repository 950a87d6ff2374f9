use core::fmt;
use core::hash::Hash;

/// A 64-bit Snowflake ID with a fixed bit layout.
///
/// The most significant bit is reserved and always zero, so every valid ID is
/// also a non-negative `i64`. The remaining 63 bits hold, from MSB to LSB:
///
/// ```text
///  +--------------+-----------------+------------------+--------------+----------+
///  | reserved (1) | timestamp delta | datacenter ID    | worker ID    | sequence |
///  +--------------+-----------------+------------------+--------------+----------+
/// ```
///
/// Implementations are normally generated with [`define_snowflake_id!`], which
/// checks at compile time that the widths add up to 64 bits.
///
/// # Example
///
/// ```
/// use flakeid::{Snowflake, SnowflakeId};
///
/// let id = SnowflakeId::from_components(1000, 3, 7, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.datacenter_id(), 3);
/// assert_eq!(id.worker_id(), 7);
/// assert_eq!(id.sequence(), 1);
/// ```
///
/// [`define_snowflake_id!`]: crate::define_snowflake_id
pub trait Snowflake:
    Copy
    + Clone
    + fmt::Display
    + fmt::Debug
    + PartialOrd
    + Ord
    + PartialEq
    + Eq
    + Hash
    + Send
    + Sync
    + 'static
{
    /// Width of the timestamp delta field.
    const TIMESTAMP_BITS: u32;
    /// Width of the datacenter ID field.
    const DATACENTER_ID_BITS: u32;
    /// Width of the worker ID field.
    const WORKER_ID_BITS: u32;
    /// Width of the sequence field.
    const SEQUENCE_BITS: u32;

    const SEQUENCE_SHIFT: u32 = 0;
    const WORKER_ID_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
    const DATACENTER_ID_SHIFT: u32 = Self::WORKER_ID_SHIFT + Self::WORKER_ID_BITS;
    const TIMESTAMP_SHIFT: u32 = Self::DATACENTER_ID_SHIFT + Self::DATACENTER_ID_BITS;

    /// Largest timestamp delta (in milliseconds past the epoch).
    const MAX_TIMESTAMP: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    /// `2^DATACENTER_ID_BITS - 1`
    const MAX_DATACENTER_ID: u64 = (1 << Self::DATACENTER_ID_BITS) - 1;
    /// `2^WORKER_ID_BITS - 1`
    const MAX_WORKER_ID: u64 = (1 << Self::WORKER_ID_BITS) - 1;
    /// `2^SEQUENCE_BITS - 1`, also used as the sequence wrap mask.
    const MAX_SEQUENCE: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Packs the four fields into an ID. Out-of-range values are masked to
    /// their field width.
    fn from_components(timestamp: u64, datacenter_id: u64, worker_id: u64, sequence: u64) -> Self;

    /// Converts a raw integer into this type without validation.
    fn from_raw(raw: u64) -> Self;

    /// Returns the packed integer.
    fn to_raw(&self) -> u64;

    /// Milliseconds since the generator's epoch.
    fn timestamp(&self) -> u64 {
        (self.to_raw() >> Self::TIMESTAMP_SHIFT) & Self::MAX_TIMESTAMP
    }

    fn datacenter_id(&self) -> u64 {
        (self.to_raw() >> Self::DATACENTER_ID_SHIFT) & Self::MAX_DATACENTER_ID
    }

    fn worker_id(&self) -> u64 {
        (self.to_raw() >> Self::WORKER_ID_SHIFT) & Self::MAX_WORKER_ID
    }

    fn sequence(&self) -> u64 {
        (self.to_raw() >> Self::SEQUENCE_SHIFT) & Self::MAX_SEQUENCE
    }

    /// Returns `true` if the reserved sign bit is clear.
    fn is_valid(&self) -> bool {
        self.to_raw() >> 63 == 0
    }

    /// The ID as a signed integer, the representation handed to callers and
    /// storage layers.
    fn to_i64(&self) -> i64 {
        self.to_raw() as i64
    }

    /// Reconstructs the wall-clock time (ms since the Unix epoch) the ID was
    /// generated at, given the epoch it was generated with.
    ///
    /// Saturates at `i64::MAX` for epochs too close to it.
    fn unix_millis(&self, epoch: i64) -> i64 {
        epoch.saturating_add(self.timestamp() as i64)
    }

    /// Returns the ID as a zero-padded 20-digit string, which sorts the same
    /// way lexicographically as numerically.
    fn to_padded_string(&self) -> String {
        format!("{:020}", self.to_raw())
    }
}
