//! Time sources for timers and achievement timestamps

use chrono::{DateTime, TimeDelta, Utc};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time and wall-clock timestamps
pub trait Clock {
    /// Monotonic instant used for elapsed-time measurement
    fn now(&self) -> Instant;

    /// Wall-clock timestamp used for persisted records
    fn timestamp(&self) -> DateTime<Utc>;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock advanced by hand
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the session under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Rc<Cell<(Instant, DateTime<Utc>)>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new((Instant::now(), Utc::now()))),
        }
    }

    /// Move both time sources forward by `by`
    pub fn advance(&self, by: Duration) {
        let (instant, stamp) = self.state.get();
        let delta = TimeDelta::from_std(by).unwrap_or_else(|_| TimeDelta::zero());
        self.state.set((instant + by, stamp + delta));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.get().0
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.state.get().1
    }
}
