//! Time sources for the staleness window.
//!
//! Times are `Duration`s since an arbitrary, clock-specific origin; only
//! differences between two readings of the same clock are meaningful.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Clock: Send {
    fn now(&self) -> Duration;
}

/// Monotonic wall clock.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Externally driven clock with microsecond resolution.
///
/// Clones share the same reading, so a test (or a replay of recorded
/// timestamps) can hold one handle while the orchestrator owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.micros
            .store(now.as_micros().min(u64::MAX as u128) as u64, Ordering::Release);
    }

    pub fn advance(&self, by: Duration) {
        self.set(self.now() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Acquire))
    }
}
