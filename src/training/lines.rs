//! Line-tracking engine
//!
//! Keeps the set of repertoire lines still consistent with the moves played
//! in the current attempt and answers the questions the session needs after
//! every move:
//!
//! - is the move just played in the repertoire?
//! - which moves may either side play next?
//! - which reply should the computer play?
//! - has the opening been exhausted?
//!
//! # Active Set Representation
//!
//! Lines live in a shared arena (`Arc<[Line]>`). An [`ActiveLineSet`] is an
//! immutable list of arena indices; narrowing builds a new set from the old
//! one, so a set can only ever lose members within an attempt.

use super::error::{TrackError, TrackResult};
use crate::repertoire::{Line, MoveRecord, Repertoire};
use chess_rules::{RulesEngine, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, error};

/// Result of offering a played move to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one active line continues with this move
    Accepted,
    /// Legal chess, but no active line has it at this ply
    OutOfRepertoire,
}

/// Subset of a repertoire's lines, by arena index
#[derive(Debug, Clone)]
pub struct ActiveLineSet {
    arena: Arc<[Line]>,
    members: Arc<[usize]>,
}

impl ActiveLineSet {
    /// Every line of the arena
    pub fn full(arena: Arc<[Line]>) -> Self {
        let members = (0..arena.len()).collect::<Vec<_>>().into();
        Self { arena, members }
    }

    /// Lines whose record at `ply` matches `played`
    pub fn narrowed(&self, ply: usize, played: &str) -> Self {
        let members: Vec<usize> = self
            .members
            .iter()
            .copied()
            .filter(|&i| self.arena[i].get(ply).is_some_and(|r| r.matches(played)))
            .collect();
        Self {
            arena: Arc::clone(&self.arena),
            members: members.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Arena indices of the member lines, ascending
    pub fn indices(&self) -> &[usize] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        self.members.iter().map(move |&i| &self.arena[i])
    }

    pub fn first(&self) -> Option<&Line> {
        self.members.first().map(|&i| &self.arena[i])
    }
}

/// Chooses one of `count` candidate replies
///
/// Injected so tests can make the computer's choice deterministic.
pub trait ReplyPicker {
    /// Index in `0..count`; `count` is never zero
    fn pick(&mut self, count: usize) -> usize;
}

impl<F: FnMut(usize) -> usize> ReplyPicker for F {
    fn pick(&mut self, count: usize) -> usize {
        self(count)
    }
}

/// Uniform random choice
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.rng.random_range(0..count)
    }
}

/// Always the first candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPicker;

impl ReplyPicker for FirstPicker {
    fn pick(&mut self, _count: usize) -> usize {
        0
    }
}

/// Active lines and ply counter of one attempt
#[derive(Debug, Clone)]
pub struct LineTracker {
    all: ActiveLineSet,
    active: ActiveLineSet,
    played_ply_count: usize,
}

impl LineTracker {
    pub fn new(repertoire: &Repertoire) -> Self {
        Self::from_lines(Arc::clone(repertoire.lines()))
    }

    pub fn from_lines(lines: Arc<[Line]>) -> Self {
        let all = ActiveLineSet::full(lines);
        Self {
            active: all.clone(),
            all,
            played_ply_count: 0,
        }
    }

    /// Re-seed from the full repertoire for a new attempt
    pub fn reset(&mut self) {
        self.active = self.all.clone();
        self.played_ply_count = 0;
    }

    pub fn active_lines(&self) -> &ActiveLineSet {
        &self.active
    }

    pub fn played_ply_count(&self) -> usize {
        self.played_ply_count
    }

    /// Offer the move the rules engine just applied
    ///
    /// On [`SubmitOutcome::OutOfRepertoire`] nothing changes; the caller is
    /// responsible for taking the move back on the rules engine.
    pub fn submit_move(&mut self, played: &str) -> SubmitOutcome {
        let ply = self.played_ply_count;
        let narrowed = self.active.narrowed(ply, played);
        if narrowed.is_empty() {
            debug!("[TRACKER] '{}' at ply {} is out of repertoire", played, ply);
            return SubmitOutcome::OutOfRepertoire;
        }

        debug!(
            "[TRACKER] '{}' at ply {} keeps {} of {} line(s)",
            played,
            ply,
            narrowed.len(),
            self.active.len()
        );
        self.active = narrowed;
        self.played_ply_count += 1;
        SubmitOutcome::Accepted
    }

    /// Records at the current ply of every active line, for `side`
    pub fn next_mover_options(&self, side: Side) -> Vec<&MoveRecord> {
        self.active
            .iter()
            .filter_map(|line| line.get(self.played_ply_count))
            .filter(|record| record.side == side)
            .collect()
    }

    /// [`Self::next_mover_options`] with one representative per notation
    pub fn distinct_options(&self, side: Side) -> Vec<&MoveRecord> {
        let mut distinct: Vec<&MoveRecord> = Vec::new();
        for record in self.next_mover_options(side) {
            if !distinct.iter().any(|d| d.notation == record.notation) {
                distinct.push(record);
            }
        }
        distinct
    }

    /// No active line has a record for `side_to_move` at the current ply
    pub fn is_finished(&self, side_to_move: Side) -> bool {
        self.next_mover_options(side_to_move).is_empty()
    }

    /// Pick and play the computer's reply for `side`
    ///
    /// Returns `Ok(None)` when no active line continues for `side`, meaning
    /// the opening is finished. Otherwise the chosen move is applied on
    /// `rules` and submitted, and its record is returned.
    pub fn select_opponent_reply<R: RulesEngine + ?Sized>(
        &mut self,
        side: Side,
        rules: &mut R,
        picker: &mut dyn ReplyPicker,
    ) -> TrackResult<Option<MoveRecord>> {
        let choices = self.distinct_options(side);
        if choices.is_empty() {
            return Ok(None);
        }
        let index = picker.pick(choices.len()).min(choices.len() - 1);
        let chosen = choices[index].clone();

        let played = rules
            .apply_san(&chosen.notation)
            .map_err(|source| TrackError::EngineRejected {
                notation: chosen.notation.clone(),
                source,
            })?;

        match self.submit_move(&played.san) {
            SubmitOutcome::Accepted => Ok(Some(chosen)),
            SubmitOutcome::OutOfRepertoire => {
                if let Err(e) = rules.undo_last_move() {
                    error!("[TRACKER] Failed to take back diverged reply '{}': {}", played.san, e);
                }
                Err(TrackError::ReplyDiverged {
                    notation: played.san,
                })
            }
        }
    }
}
