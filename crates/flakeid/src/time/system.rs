#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// A time source that reads the system wall clock on every call.
///
/// Wall-clock time follows NTP corrections and manual adjustments, so it can
/// move backwards. A generator driven by this clock surfaces that as
/// [`Error::ClockMovedBackwards`] instead of issuing a smaller ID. Prefer
/// [`MonotonicClock`] when that is not acceptable.
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        // A clock set before 1970 reads as negative, which the generator
        // rejects as out of range.
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as i64,
            Err(before) => -(before.duration().as_millis() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_plausible_wall_clock() {
        let now = SystemClock.current_millis();
        assert!(now > crate::DEFAULT_EPOCH);
    }
}
