use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source for response-latency measurement.
pub trait Clock: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, since: Self::Timestamp) -> Duration;
}

/// Production clock backed by `Instant`; timestamps are nanoseconds since
/// clock creation.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    type Timestamp = u64;

    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    fn elapsed(&self, since: u64) -> Duration {
        // saturating: a stale timestamp must never produce a negative span
        Duration::from_nanos(self.now().saturating_sub(since))
    }
}

/// Manually-advanced clock for deterministic tests. Clones share one
/// counter, so a test can hold a handle while the runner owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ns: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now_ns: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now_ns
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    type Timestamp = u64;

    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }

    fn elapsed(&self, since: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(since))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_elapsed_is_nonnegative() {
        let clock = MonotonicClock::new();
        let t0 = clock.now();
        assert!(clock.elapsed(t0) >= Duration::ZERO);
        // A timestamp from the future must saturate to zero, not wrap.
        assert_eq!(clock.elapsed(u64::MAX), Duration::ZERO);
    }

    #[test]
    fn manual_clock_advances_shared_state() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let t0 = clock.now();
        handle.advance(Duration::from_millis(250));
        assert_eq!(clock.elapsed(t0), Duration::from_millis(250));
    }
}
