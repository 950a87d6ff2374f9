use core::time::Duration;
use std::{
    sync::{Arc, OnceLock, Weak},
    thread::{self, JoinHandle},
    time::Instant,
};

use portable_atomic::{AtomicI64, Ordering};

use crate::{SystemClock, TimeSource};

/// Shared ticker state updated once per millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    elapsed: AtomicI64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source reporting Unix milliseconds.
///
/// The wall clock is sampled once at construction. From then on, time
/// advances by the elapsed [`Instant`] measured by a background ticker thread,
/// so reads never go backward even if the system clock is adjusted
/// externally, and the hot path is a single atomic load.
///
/// Clones share one ticker. The thread exits once the last clone is dropped.
///
/// # Example
///
/// ```
/// use flakeid::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(3));
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    anchor: i64, // unix millis at construction
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Starts a ticker anchored to the current wall-clock time.
    pub fn new() -> Self {
        Self::with_anchor(SystemClock.current_millis())
    }

    /// Starts a ticker whose first reading is `anchor` (Unix milliseconds).
    ///
    /// Useful to pin the clock to a known instant in tests.
    pub fn with_anchor(anchor: i64) -> Self {
        let start = Instant::now();
        let inner = Arc::new(SharedTickerInner {
            elapsed: AtomicI64::new(0),
            _handle: OnceLock::new(),
        });

        let ticker = Arc::downgrade(&inner);
        let handle = thread::spawn(move || run_ticker(&ticker, start));

        // Freshly created, so the cell is always empty here.
        let _ = inner._handle.set(handle);

        Self { inner, anchor }
    }
}

/// Publishes the elapsed milliseconds since `start`, waking once per
/// millisecond until every clock sharing `inner` is gone.
fn run_ticker(inner: &Weak<SharedTickerInner>, start: Instant) {
    let mut next_tick = Duration::ZERO;
    while let Some(shared) = inner.upgrade() {
        let elapsed = start.elapsed();
        if elapsed < next_tick {
            // The strong reference must not outlive a sleep, or dropping
            // the last clock would never stop the thread.
            drop(shared);
            thread::sleep(next_tick - elapsed);
            continue;
        }

        let millis = elapsed.as_millis() as u64;
        shared.elapsed.store(millis as i64, Ordering::Release);
        next_tick = Duration::from_millis(millis + 1);
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> i64 {
        self.anchor + self.inner.elapsed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_anchor_and_never_goes_back() {
        let clock = MonotonicClock::with_anchor(1_000);
        let mut last = clock.current_millis();
        assert!(last >= 1_000);
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn advances_with_real_time() {
        let clock = MonotonicClock::with_anchor(0);
        thread::sleep(Duration::from_millis(20));
        assert!(clock.current_millis() >= 5);
    }

    #[test]
    fn clones_share_one_ticker() {
        let clock = MonotonicClock::with_anchor(0);
        let clone = clock.clone();
        assert!(Arc::ptr_eq(&clock.inner, &clone.inner));
    }
}
