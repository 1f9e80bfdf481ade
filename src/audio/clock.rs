use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Monotonic clock a sink measures pulse deadlines against
pub trait DeviceClock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Device clock backed by [`Instant`], starting at zero when created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The wall instant that corresponds to `at` on this clock
    pub fn instant_at(&self, at: Duration) -> Instant {
        self.origin + at
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceClock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }

    pub fn set(&self, to: Duration) {
        if let Ok(mut now) = self.now.lock() {
            // Device clocks never run backwards
            if to > *now {
                *now = to;
            }
        }
    }
}

impl DeviceClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}
