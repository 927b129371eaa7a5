//! Running statistics for one repertoire
//!
//! [`SessionStats`] spans attempts: it is owned by the session controller
//! and reset explicitly when the target is reached or the repertoire
//! changes.

use std::time::Duration;

/// Counters accumulated across attempts on one repertoire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// Attempts started since the last reset
    pub attempts: u32,
    /// Errors in the current attempt
    pub attempt_errors: u32,
    /// Errors across all attempts since the last reset
    pub total_errors: u32,
    /// Sum of finished attempt times
    pub total_time: Duration,
    /// Fastest finished attempt
    pub min_time: Option<Duration>,
    /// Error-free natural completions in a row
    pub consecutive_successes: u32,
    /// Completions required for the objective
    pub target: u32,
}

impl SessionStats {
    pub fn new(target: u32) -> Self {
        Self {
            attempts: 0,
            attempt_errors: 0,
            total_errors: 0,
            total_time: Duration::ZERO,
            min_time: None,
            consecutive_successes: 0,
            target,
        }
    }

    pub fn record_attempt_start(&mut self) {
        self.attempts += 1;
        self.attempt_errors = 0;
    }

    pub fn record_error(&mut self) {
        self.attempt_errors += 1;
        self.total_errors += 1;
    }

    /// Account for a finished attempt
    ///
    /// `elapsed` is `None` when the timer never started, so the learner
    /// made no move; such a finish is no success, and neither is a `forced`
    /// finish (the learner revealed the line). Returns whether the attempt
    /// was a success.
    pub fn record_finish(&mut self, elapsed: Option<Duration>, forced: bool) -> bool {
        if let Some(elapsed) = elapsed {
            self.total_time += elapsed;
            self.min_time = Some(self.min_time.map_or(elapsed, |min| min.min(elapsed)));
        }

        let success = !forced && elapsed.is_some() && self.attempt_errors == 0;
        if success {
            self.consecutive_successes += 1;
        } else {
            self.consecutive_successes = 0;
        }
        success
    }

    pub fn target_reached(&self) -> bool {
        self.consecutive_successes >= self.target
    }

    pub fn average_time(&self) -> Duration {
        if self.attempts == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.attempts
        }
    }

    /// Clear all counters, keeping the target
    pub fn reset(&mut self) {
        *self = Self::new(self.target);
    }

    /// Formatted values for display
    pub fn view(&self) -> StatsView {
        StatsView {
            completions: format!("{} / {}", self.consecutive_successes, self.target),
            errors: format!("{} / 0", self.total_errors),
            total_time: format_time(self.total_time),
            average_time: format_time(self.average_time()),
            min_time: self.min_time.map_or_else(|| "N/A".to_string(), format_time),
        }
    }
}

/// Statistics as shown to the learner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub completions: String,
    pub errors: String,
    pub total_time: String,
    pub average_time: String,
    pub min_time: String,
}

/// `HH:MM:SS`
pub fn format_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// `MM:SS`, minutes unbounded
pub fn format_timer(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
