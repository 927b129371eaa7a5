//! Attempt timer with hint-penalty accounting
//!
//! The timer starts on the learner's first accepted move and runs until the
//! attempt finishes. Each hint stage costs a fixed penalty:
//!
//! - **Running**: the penalty is added to the running offset, which has the
//!   same effect as moving the start time earlier
//! - **Not started**: the penalty accumulates and becomes the initial offset
//!   once the timer starts
//!
//! Either way the final elapsed time is wall-clock time plus all penalties,
//! regardless of when the penalties were taken.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle { pending_penalty: Duration },
    Running { started_at: Instant, offset: Duration },
    Stopped { elapsed: Duration },
}

/// Elapsed time of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingTimer {
    state: TimerState,
}

impl Default for TrainingTimer {
    fn default() -> Self {
        Self {
            state: TimerState::Idle {
                pending_penalty: Duration::ZERO,
            },
        }
    }
}

impl TrainingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, TimerState::Idle { .. })
    }

    /// Start counting at `now`; no effect unless idle
    pub fn start(&mut self, now: Instant) {
        if let TimerState::Idle { pending_penalty } = self.state {
            self.state = TimerState::Running {
                started_at: now,
                offset: pending_penalty,
            };
        }
    }

    /// Add `penalty` to the attempt time; ignored once stopped
    pub fn apply_penalty(&mut self, penalty: Duration) {
        match &mut self.state {
            TimerState::Idle { pending_penalty } => *pending_penalty += penalty,
            TimerState::Running { offset, .. } => *offset += penalty,
            TimerState::Stopped { .. } => {}
        }
    }

    /// Stop and freeze the elapsed time
    ///
    /// Returns the final elapsed time if the timer was running.
    pub fn stop(&mut self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Running { .. } => {
                let elapsed = self.elapsed(now);
                self.state = TimerState::Stopped { elapsed };
                Some(elapsed)
            }
            _ => None,
        }
    }

    /// Elapsed time including penalties
    ///
    /// While idle this is the pending penalty, which is what the clock
    /// display shows before the first move.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            TimerState::Idle { pending_penalty } => pending_penalty,
            TimerState::Running { started_at, offset } => {
                now.saturating_duration_since(started_at) + offset
            }
            TimerState::Stopped { elapsed } => elapsed,
        }
    }

    /// Stop and zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PENALTY: Duration = Duration::from_secs(30);

    #[test]
    fn test_timer_idle_until_started() {
        //! A new timer reads zero and is not running
        let timer = TrainingTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_penalty_while_running_shifts_elapsed() {
        //! A penalty during the attempt raises elapsed time immediately
        let start = Instant::now();
        let mut timer = TrainingTimer::new();
        timer.start(start);

        timer.apply_penalty(PENALTY);

        assert_eq!(timer.elapsed(start + Duration::from_secs(10)), Duration::from_secs(40));
    }

    #[test]
    fn test_pending_penalty_becomes_initial_offset() {
        //! Penalties taken before the first move are shown, then carried over
        let start = Instant::now();
        let mut timer = TrainingTimer::new();
        timer.apply_penalty(PENALTY);
        assert_eq!(timer.elapsed(start), PENALTY, "Idle display shows pending penalty");

        timer.start(start);

        assert_eq!(timer.elapsed(start + Duration::from_secs(5)), Duration::from_secs(35));
    }

    #[test]
    fn test_penalty_order_does_not_matter() {
        //! Two penalties before the start equal two penalties after it
        let start = Instant::now();
        let end = start + Duration::from_secs(12);

        let mut before = TrainingTimer::new();
        before.apply_penalty(PENALTY);
        before.apply_penalty(PENALTY);
        before.start(start);

        let mut after = TrainingTimer::new();
        after.start(start);
        after.apply_penalty(PENALTY);
        after.apply_penalty(PENALTY);

        assert_eq!(before.stop(end), after.stop(end));
        assert_eq!(before.elapsed(end), Duration::from_secs(72));
    }

    #[test]
    fn test_stop_freezes_and_reset_zeroes() {
        //! Stopped time no longer advances; reset returns to idle
        let start = Instant::now();
        let mut timer = TrainingTimer::new();
        timer.start(start);

        assert_eq!(timer.stop(start + Duration::from_secs(3)), Some(Duration::from_secs(3)));
        assert_eq!(timer.elapsed(start + Duration::from_secs(60)), Duration::from_secs(3));
        assert_eq!(timer.stop(start + Duration::from_secs(60)), None, "Second stop is a no-op");

        timer.reset();
        assert!(!timer.is_started());
        assert_eq!(timer.elapsed(start), Duration::ZERO);
    }
}
