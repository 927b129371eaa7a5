//! Deferred computer replies
//!
//! The computer answers after a short display delay so the learner sees
//! their own move first. Each scheduled reply is a ticket stamped with the
//! attempt generation; resetting bumps the generation, so a ticket issued
//! for an earlier attempt is refused when it fires.

use std::time::{Duration, Instant};
use tracing::debug;

/// A reply due at `due` for attempt `generation`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReply {
    pub generation: u64,
    pub due: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct ReplyScheduler {
    generation: u64,
    pending: Option<ScheduledReply>,
}

impl ReplyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new attempt generation, dropping any pending reply
    pub fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.pending = None;
        self.generation
    }

    /// Schedule a reply `delay` after `now` for the current generation
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> ScheduledReply {
        let ticket = ScheduledReply {
            generation: self.generation,
            due: now + delay,
        };
        self.pending = Some(ticket);
        ticket
    }

    pub fn pending(&self) -> Option<ScheduledReply> {
        self.pending
    }

    pub fn is_current(&self, ticket: &ScheduledReply) -> bool {
        ticket.generation == self.generation
    }

    /// Consume `ticket` if it is the pending reply of the current generation
    pub fn claim(&mut self, ticket: ScheduledReply) -> bool {
        if !self.is_current(&ticket) || self.pending != Some(ticket) {
            debug!(
                "[SCHEDULER] Ignoring stale reply for generation {} (current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        self.pending = None;
        true
    }

    /// The pending reply, if it is due at `now`
    pub fn take_due(&mut self, now: Instant) -> Option<ScheduledReply> {
        match self.pending {
            Some(ticket) if ticket.due <= now => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }
}
