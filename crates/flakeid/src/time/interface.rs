use std::{rc::Rc, sync::Arc};

/// Default epoch: Wednesday, January 1, 2025 00:00:00 UTC
///
/// Used whenever a generator is configured without an epoch, or with a
/// negative one.
pub const DEFAULT_EPOCH: i64 = 1_735_689_600_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: i64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: i64 = 1_420_070_400_000;

/// A source of the current time in **milliseconds since the Unix epoch**.
///
/// Generators never read an ambient clock; they ask their `TimeSource`. This
/// lets tests simulate same-millisecond bursts and backward jumps
/// deterministically. Implementations must be safe to read concurrently and
/// should not mutate shared state on read.
///
/// The value is expected to be monotonic under normal operation, but this is
/// not assumed: generators report apparent backward movement as
/// [`Error::ClockMovedBackwards`].
///
/// # Example
///
/// ```
/// use flakeid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1_735_689_600_123
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1_735_689_600_123);
/// ```
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
pub trait TimeSource {
    /// Returns the current time in milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}
