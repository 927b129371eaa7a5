//! Session controller
//!
//! Owns every piece of mutable training state and sequences one attempt at a
//! time through `NotStarted -> InProgress -> Finished`:
//!
//! - the rules engine, for legality and SAN
//! - the [`LineTracker`], for repertoire membership
//! - the [`TrainingTimer`], [`HintState`] and [`SessionStats`]
//! - the [`ReplyScheduler`], for the deferred computer reply
//! - the rendering surface and the achievement recorder
//!
//! # Control Flow
//!
//! The controller is driven by learner input (`on_move_attempt`,
//! `on_square_select`, `request_hint`, `reveal_remainder`, `reset`) and by
//! the one deferred event, the computer reply. After an accepted learner
//! move the reply is scheduled, not played; the host calls
//! [`SessionController::poll`] once the deadline passes (or hands the
//! ticket back through [`SessionController::fire_reply`]). A reset in
//! between bumps the attempt generation so the late reply is ignored.
//!
//! # Completion
//!
//! An attempt that runs out of line with zero errors is a success. Reaching
//! the target number of consecutive successes records an achievement; the
//! running stats are cleared at the start of the next attempt.

use super::error::{TrackError, TrackResult};
use super::hint::{HintOutcome, HintState};
use super::lines::{LineTracker, RandomPicker, ReplyPicker, SubmitOutcome};
use super::scheduler::{ReplyScheduler, ScheduledReply};
use super::stats::{format_timer, SessionStats};
use super::timer::TrainingTimer;
use crate::achievements::{AchievementRecord, AchievementRecorder};
use crate::core::{Clock, SystemClock, TrainerSettings};
use crate::repertoire::Repertoire;
use crate::ui::{format_move_list, BoardSurface, DisplayedMove, HighlightKind, MessageKind};
use chess_rules::{Role, RulesEngine, Side, Square};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Where the current attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Reset, no move played yet
    #[default]
    NotStarted,
    InProgress,
    /// Line exhausted or revealed; only `reset` continues
    Finished,
}

/// Answer to a learner move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAttempt {
    Accepted,
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The attempt is over
    Finished,
    /// The computer is to move
    NotLearnerTurn,
    /// Not a legal chess move
    Illegal,
    /// Legal, but in no active line; counted as an error
    OutOfRepertoire,
}

/// Timing and side options for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub learner: Side,
    /// Delay before the computer answers a learner move
    pub reply_delay: Duration,
    /// Delay before the computer's first move when the learner plays second
    pub opening_reply_delay: Duration,
    /// Time added per revealed hint stage
    pub hint_penalty: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_settings(&TrainerSettings::default())
    }
}

impl SessionOptions {
    pub fn from_settings(settings: &TrainerSettings) -> Self {
        Self {
            learner: settings.learner_side,
            reply_delay: settings.reply_delay(),
            opening_reply_delay: settings.opening_reply_delay(),
            hint_penalty: settings.hint_penalty(),
        }
    }

    pub fn with_learner(mut self, learner: Side) -> Self {
        self.learner = learner;
        self
    }
}

/// Replaceable collaborators: reply choice, time and achievement storage
pub struct Collaborators {
    pub picker: Box<dyn ReplyPicker>,
    pub clock: Box<dyn Clock>,
    pub recorder: AchievementRecorder,
}

impl Collaborators {
    /// Random replies and the system clock
    pub fn new(recorder: AchievementRecorder) -> Self {
        Self {
            picker: Box::new(RandomPicker::new()),
            clock: Box::new(SystemClock),
            recorder,
        }
    }

    pub fn with_picker(mut self, picker: impl ReplyPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

pub struct SessionController<R: RulesEngine, S: BoardSurface> {
    rules: R,
    surface: S,
    repertoire: Repertoire,
    tracker: LineTracker,
    timer: TrainingTimer,
    hint: HintState,
    stats: SessionStats,
    phase: SessionPhase,
    options: SessionOptions,
    picker: Box<dyn ReplyPicker>,
    clock: Box<dyn Clock>,
    recorder: AchievementRecorder,
    scheduler: ReplyScheduler,
    selected: Option<Square>,
    last_achievement: Option<AchievementRecord>,
}

impl<R: RulesEngine, S: BoardSurface> SessionController<R, S> {
    /// Build a controller and start the first attempt
    pub fn new(
        repertoire: Repertoire,
        rules: R,
        surface: S,
        collaborators: Collaborators,
        options: SessionOptions,
    ) -> Self {
        let Collaborators {
            picker,
            clock,
            recorder,
        } = collaborators;
        let mut session = Self {
            tracker: LineTracker::new(&repertoire),
            stats: SessionStats::new(repertoire.target_completions()),
            repertoire,
            rules,
            surface,
            timer: TrainingTimer::new(),
            hint: HintState::None,
            phase: SessionPhase::NotStarted,
            options,
            picker,
            clock,
            recorder,
            scheduler: ReplyScheduler::new(),
            selected: None,
            last_achievement: None,
        };
        info!(
            "[SESSION] Training '{}' as {} ({} line(s), target {})",
            session.repertoire.name(),
            session.options.learner,
            session.repertoire.len(),
            session.stats.target
        );
        session.reset();
        session
    }

    /// Switch to another repertoire, clearing all running stats
    pub fn load_repertoire(&mut self, repertoire: Repertoire) {
        info!(
            "[SESSION] Loaded '{}' ({} line(s), target {})",
            repertoire.name(),
            repertoire.len(),
            repertoire.target_completions()
        );
        self.tracker = LineTracker::new(&repertoire);
        self.stats = SessionStats::new(repertoire.target_completions());
        self.repertoire = repertoire;
        self.last_achievement = None;
        self.reset();
    }

    /// Start a new attempt
    ///
    /// Clears the running stats first when the previous cycle reached its
    /// target. Any pending computer reply belongs to the old attempt and is
    /// dropped.
    pub fn reset(&mut self) {
        if self.stats.target_reached() {
            info!(
                "[SESSION] Target reached for '{}', starting a new cycle",
                self.repertoire.name()
            );
            self.stats.reset();
        }

        let generation = self.scheduler.bump_generation();
        self.rules.reset();
        self.tracker.reset();
        self.stats.record_attempt_start();
        self.timer.reset();
        self.hint.clear();
        self.selected = None;
        self.phase = SessionPhase::NotStarted;

        let fen = self.rules.position_snapshot();
        self.surface.clear_highlights();
        self.surface.set_position(&fen);
        self.surface.show_note("");
        self.surface.show_objective(None);
        self.refresh_panels();

        if self.rules.side_to_move() == self.options.learner {
            self.surface.show_message(
                &format!("Your turn ({}), make the first move.", self.options.learner),
                MessageKind::Info,
            );
        } else {
            let now = self.clock.now();
            self.scheduler.schedule(now, self.options.opening_reply_delay);
            self.surface
                .show_message("Computer is thinking...", MessageKind::Info);
        }
        debug!(
            "[SESSION] Attempt {} started (generation {})",
            self.stats.attempts, generation
        );
    }

    /// Learner moved a piece from `from` to `to`
    ///
    /// Pawns reaching the last rank promote to a queen.
    pub fn on_move_attempt(&mut self, from: Square, to: Square) -> MoveAttempt {
        if let Some(rejection) = self.learner_input_blocked() {
            return MoveAttempt::Rejected(rejection);
        }
        self.clear_hint();

        let played = match self.rules.apply_move(from, to, Role::Queen) {
            Ok(played) => played,
            Err(e) => {
                debug!("[SESSION] {}", e);
                let fen = self.rules.position_snapshot();
                self.surface.set_position(&fen);
                return MoveAttempt::Rejected(Rejection::Illegal);
            }
        };

        match self.tracker.submit_move(&played.san) {
            SubmitOutcome::OutOfRepertoire => {
                if let Err(e) = self.rules.undo_last_move() {
                    error!("[SESSION] Could not take back '{}': {}", played.san, e);
                }
                self.stats.record_error();
                warn!(
                    "[SESSION] '{}' is not in the opening line (error {} this attempt)",
                    played.san, self.stats.attempt_errors
                );
                let fen = self.rules.position_snapshot();
                self.surface.set_position(&fen);
                self.surface.show_message(
                    &format!("Move \"{}\" is not in the opening line. Try again.", played.san),
                    MessageKind::Error,
                );
                self.surface.show_stats(&self.stats.view());
                MoveAttempt::Rejected(Rejection::OutOfRepertoire)
            }
            SubmitOutcome::Accepted => {
                let now = self.clock.now();
                self.phase = SessionPhase::InProgress;
                self.timer.start(now);
                let fen = self.rules.position_snapshot();
                self.surface.set_position(&fen);

                if self.tracker.is_finished(self.rules.side_to_move()) {
                    self.finish(false);
                } else {
                    self.scheduler.schedule(now, self.options.reply_delay);
                    self.refresh_panels();
                    self.surface
                        .show_message("Correct move! Computer is thinking...", MessageKind::Info);
                }
                MoveAttempt::Accepted
            }
        }
    }

    /// Click-to-move
    ///
    /// The first click selects one of the learner's pieces, a second click
    /// on it deselects, and a click elsewhere attempts the move. Returns the
    /// move outcome when a move was attempted.
    pub fn on_square_select(&mut self, square: Square) -> Option<MoveAttempt> {
        if self.learner_input_blocked().is_some() {
            return None;
        }

        match self.selected {
            None => {
                if self.rules.piece_side_at(square) == Some(self.options.learner) {
                    self.selected = Some(square);
                    self.surface.highlight(square, HighlightKind::Selected);
                }
                None
            }
            Some(selected) if selected == square => {
                self.selected = None;
                self.surface.clear_highlights();
                None
            }
            Some(selected) => {
                let outcome = self.on_move_attempt(selected, square);
                self.selected = None;
                self.surface.clear_highlights();
                Some(outcome)
            }
        }
    }

    /// Reveal the next stage of the hint for the learner's move
    pub fn request_hint(&mut self) -> HintOutcome {
        if self.learner_input_blocked().is_some() {
            return HintOutcome::Unavailable;
        }

        let options = self.tracker.next_mover_options(self.options.learner);
        let outcome = self.hint.request(&options);
        match outcome {
            HintOutcome::PieceRevealed(origin) => {
                self.surface.clear_highlights();
                self.surface.highlight(origin, HighlightKind::HintPiece);
            }
            HintOutcome::SquareRevealed(destination) => {
                self.surface.highlight(destination, HighlightKind::HintSquare);
            }
            HintOutcome::Unavailable | HintOutcome::AlreadyRevealed => {}
        }

        if outcome.is_penalized() {
            self.timer.apply_penalty(self.options.hint_penalty);
            info!(
                "[HINT] {:?} (+{}s)",
                outcome,
                self.options.hint_penalty.as_secs()
            );
            let display = self.timer_display();
            self.surface.show_timer(&display);
        }
        outcome
    }

    /// Play the rest of the first active line and finish the attempt
    ///
    /// Counts as an error and never as a success. Returns `Ok(false)` when
    /// there is nothing to reveal.
    pub fn reveal_remainder(&mut self) -> TrackResult<bool> {
        if self.phase == SessionPhase::Finished {
            return Ok(false);
        }
        let Some(line) = self.tracker.active_lines().first().cloned() else {
            return Ok(false);
        };

        // a pending reply would land on the revealed position
        self.scheduler.bump_generation();
        self.clear_hint();

        let start = self.tracker.played_ply_count();
        for record in line.records().iter().skip(start) {
            let played = self
                .rules
                .apply_san(&record.notation)
                .map_err(|source| TrackError::EngineRejected {
                    notation: record.notation.clone(),
                    source,
                })?;
            if self.tracker.submit_move(&played.san) == SubmitOutcome::OutOfRepertoire {
                warn!(
                    "[SESSION] Revealed '{}' was reported as '{}' and left the tracked lines",
                    record.notation, played.san
                );
            }
        }
        info!(
            "[SESSION] Revealed {} remaining move(s) of '{}'",
            line.len().saturating_sub(start),
            self.repertoire.name()
        );

        self.stats.record_error();
        let fen = self.rules.position_snapshot();
        self.surface.set_position(&fen);
        self.finish(true);
        Ok(true)
    }

    /// Run the scheduled reply for `ticket`
    ///
    /// Returns `Ok(false)` without touching the game when the ticket is
    /// stale or already used.
    pub fn fire_reply(&mut self, ticket: ScheduledReply) -> TrackResult<bool> {
        if !self.scheduler.claim(ticket) {
            return Ok(false);
        }
        self.play_reply()?;
        Ok(true)
    }

    /// Run the pending reply if its deadline has passed
    pub fn poll(&mut self) -> TrackResult<bool> {
        let now = self.clock.now();
        if self.scheduler.take_due(now).is_none() {
            return Ok(false);
        }
        self.play_reply()?;
        Ok(true)
    }

    fn play_reply(&mut self) -> TrackResult<()> {
        let side = self.rules.side_to_move();
        let reply =
            self.tracker
                .select_opponent_reply(side, &mut self.rules, self.picker.as_mut())?;

        let Some(record) = reply else {
            debug!("[SESSION] No reply for {}, line exhausted", side);
            self.finish(false);
            return Ok(());
        };

        self.phase = SessionPhase::InProgress;
        let fen = self.rules.position_snapshot();
        self.surface.set_position(&fen);

        if self.tracker.is_finished(self.rules.side_to_move()) {
            self.finish(false);
        } else {
            self.refresh_panels();
            let verb = if self.rules.move_history().len() == 1 {
                "started with"
            } else {
                "responded with"
            };
            self.surface.show_message(
                &format!(
                    "Computer {} {}. Your turn ({}).",
                    verb, record.notation, self.options.learner
                ),
                MessageKind::Info,
            );
        }
        Ok(())
    }

    fn finish(&mut self, forced: bool) {
        let now = self.clock.now();
        let elapsed = self
            .timer
            .stop(now)
            .map(|d| Duration::from_secs(d.as_secs()));
        self.phase = SessionPhase::Finished;
        self.scheduler.bump_generation();

        let success = self.stats.record_finish(elapsed, forced);
        let note = self
            .tracker
            .active_lines()
            .first()
            .map(|line| line.opening_note().to_string())
            .unwrap_or_default();

        let message = if forced {
            "Opening line shown."
        } else {
            "Opening line completed! Congratulations!"
        };
        self.surface.show_message(message, MessageKind::Info);
        self.surface.show_note(&note);
        self.refresh_panels();

        info!(
            "[SESSION] Attempt {} of '{}' finished: forced={} errors={} success={} ({}/{})",
            self.stats.attempts,
            self.repertoire.name(),
            forced,
            self.stats.attempt_errors,
            success,
            self.stats.consecutive_successes,
            self.stats.target
        );

        if success && self.stats.target_reached() {
            let name = self.repertoire.name().to_string();
            let timestamp = self.clock.timestamp();
            match self
                .recorder
                .record_if_target_reached(&self.stats, &name, timestamp)
            {
                Ok(Some(record)) => self.last_achievement = Some(record),
                Ok(None) => {}
                Err(e) => error!("[ACHIEVEMENTS] Failed to save achievement: {}", e),
            }
            let objective = format!("Objective achieved for {}!", name);
            self.surface.show_objective(Some(&objective));
            self.surface.show_message(&objective, MessageKind::Success);
        }
    }

    fn learner_input_blocked(&self) -> Option<Rejection> {
        if self.phase == SessionPhase::Finished {
            return Some(Rejection::Finished);
        }
        if self.rules.side_to_move() != self.options.learner || self.scheduler.pending().is_some() {
            return Some(Rejection::NotLearnerTurn);
        }
        None
    }

    fn clear_hint(&mut self) {
        self.hint.clear();
        self.selected = None;
        self.surface.clear_highlights();
    }

    fn refresh_panels(&mut self) {
        let moves = format_move_list(&self.move_list(), self.phase != SessionPhase::Finished);
        self.surface.show_moves(&moves);
        self.surface.show_stats(&self.stats.view());
        let display = self.timer_display();
        self.surface.show_timer(&display);
    }

    /// Moves played so far, annotated as in the first active line
    pub fn move_list(&self) -> Vec<DisplayedMove> {
        let history = self.rules.move_history();
        match self.tracker.active_lines().first() {
            Some(line) => line
                .records()
                .iter()
                .take(history.len())
                .map(|r| DisplayedMove::new(r.side, r.annotated_notation.clone()))
                .collect(),
            None => history
                .iter()
                .map(|m| DisplayedMove::new(m.side, m.san.clone()))
                .collect(),
        }
    }

    /// Live timer, `MM:SS`
    pub fn timer_display(&self) -> String {
        format_timer(self.timer.elapsed(self.clock.now()))
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed(self.clock.now())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn repertoire(&self) -> &Repertoire {
        &self.repertoire
    }

    pub fn tracker(&self) -> &LineTracker {
        &self.tracker
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn hint_state(&self) -> &HintState {
        &self.hint
    }

    pub fn learner(&self) -> Side {
        self.options.learner
    }

    pub fn recorder(&self) -> &AchievementRecorder {
        &self.recorder
    }

    /// Achievement recorded by the latest completed cycle
    pub fn last_achievement(&self) -> Option<&AchievementRecord> {
        self.last_achievement.as_ref()
    }

    /// The reply waiting to be played, if any
    pub fn pending_reply(&self) -> Option<ScheduledReply> {
        self.scheduler.pending()
    }

    /// When the pending reply is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.pending().map(|ticket| ticket.due)
    }

    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::MemoryStore;
    use crate::core::ManualClock;
    use crate::training::lines::FirstPicker;
    use crate::ui::RecordingSurface;
    use chess_rules::ShakmatyRules;

    const ITALIAN: &str =
        "[Event \"Italian\"]\n\n1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 *";

    fn session(
        pgn: &str,
        learner: Side,
    ) -> (SessionController<ShakmatyRules, RecordingSurface>, ManualClock, RecordingSurface) {
        let clock = ManualClock::new();
        let surface = RecordingSurface::new();
        let collaborators = Collaborators::new(AchievementRecorder::new(Box::new(MemoryStore::new())))
            .with_picker(FirstPicker)
            .with_clock(clock.clone());
        let controller = SessionController::new(
            Repertoire::from_pgn("Italian", pgn).unwrap(),
            ShakmatyRules::new(),
            surface.clone(),
            collaborators,
            SessionOptions::default().with_learner(learner),
        );
        (controller, clock, surface)
    }

    #[test]
    fn test_accepted_move_schedules_reply() {
        //! The computer answers only after the reply delay
        let (mut s, clock, _) = session(ITALIAN, Side::White);

        assert_eq!(s.on_move_attempt(Square::E2, Square::E4), MoveAttempt::Accepted);
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert!(!s.poll().unwrap(), "Reply must wait for its delay");

        clock.advance(Duration::from_millis(800));
        assert!(s.poll().unwrap());
        assert_eq!(s.rules().san_history(), vec!["e4", "e5"]);
    }

    #[test]
    fn test_moves_blocked_while_reply_pending() {
        let (mut s, _, _) = session(ITALIAN, Side::White);
        s.on_move_attempt(Square::E2, Square::E4);

        assert_eq!(
            s.on_move_attempt(Square::D2, Square::D4),
            MoveAttempt::Rejected(Rejection::NotLearnerTurn)
        );
    }

    #[test]
    fn test_illegal_move_is_not_an_error() {
        //! Snapping back an illegal move costs nothing
        let (mut s, _, _) = session(ITALIAN, Side::White);

        assert_eq!(
            s.on_move_attempt(Square::E2, Square::E5),
            MoveAttempt::Rejected(Rejection::Illegal)
        );
        assert_eq!(s.stats().attempt_errors, 0);
        assert_eq!(s.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_two_stage_hint_with_penalties() {
        //! Piece then square, 30s each, then nothing more
        let (mut s, _, surface) = session(ITALIAN, Side::White);

        assert_eq!(s.request_hint(), HintOutcome::PieceRevealed(Square::E2));
        assert_eq!(s.request_hint(), HintOutcome::SquareRevealed(Square::E4));
        assert_eq!(s.request_hint(), HintOutcome::AlreadyRevealed);

        assert_eq!(s.elapsed(), Duration::from_secs(60));
        assert_eq!(
            surface.active_highlights(),
            vec![
                (Square::E2, HighlightKind::HintPiece),
                (Square::E4, HighlightKind::HintSquare)
            ]
        );
    }

    #[test]
    fn test_move_attempt_clears_hint() {
        let (mut s, _, surface) = session(ITALIAN, Side::White);
        s.request_hint();
        s.on_move_attempt(Square::E2, Square::E4);

        assert_eq!(s.hint_state(), &HintState::None);
        assert!(surface.active_highlights().is_empty());
    }

    #[test]
    fn test_click_to_move() {
        //! Select, deselect, then select and move
        let (mut s, _, surface) = session(ITALIAN, Side::White);

        assert_eq!(s.on_square_select(Square::E7), None, "Opponent piece is not selectable");
        assert!(surface.active_highlights().is_empty());

        s.on_square_select(Square::E2);
        assert_eq!(surface.active_highlights(), vec![(Square::E2, HighlightKind::Selected)]);
        s.on_square_select(Square::E2);
        assert!(surface.active_highlights().is_empty());

        s.on_square_select(Square::E2);
        assert_eq!(s.on_square_select(Square::E4), Some(MoveAttempt::Accepted));
        assert!(surface.active_highlights().is_empty());
    }

    #[test]
    fn test_black_learner_gets_opening_move() {
        //! When the learner plays second the computer opens after the short delay
        let (mut s, clock, surface) = session(ITALIAN, Side::Black);
        assert!(s.pending_reply().is_some());

        clock.advance(Duration::from_millis(250));
        assert!(s.poll().unwrap());

        assert_eq!(s.rules().san_history(), vec!["e4"]);
        assert_eq!(
            surface.last_message().map(|(text, _)| text),
            Some("Computer started with e4. Your turn (Black).".to_string())
        );
        assert_eq!(s.on_move_attempt(Square::E7, Square::E5), MoveAttempt::Accepted);
    }

    #[test]
    fn test_computer_only_line_is_no_success() {
        //! A line that ends on the computer's opening move never starts the timer
        let (mut s, clock, _) = session("[Event \"x\"]\n\n1. e4 *", Side::Black);

        clock.advance(Duration::from_millis(250));
        assert!(s.poll().unwrap());

        assert_eq!(s.phase(), SessionPhase::Finished);
        assert_eq!(s.stats().consecutive_successes, 0);
        assert!(s.last_achievement().is_none());
    }

    #[test]
    fn test_reveal_keeps_tracker_in_step() {
        //! Every revealed ply is accepted by the tracker
        let (mut s, clock, _) = session(ITALIAN, Side::White);
        s.on_move_attempt(Square::E2, Square::E4);
        clock.advance(Duration::from_millis(800));
        s.poll().unwrap();

        assert!(s.reveal_remainder().unwrap());

        assert_eq!(s.tracker().played_ply_count(), 6);
        assert_eq!(s.tracker().active_lines().len(), 1);
        assert_eq!(s.phase(), SessionPhase::Finished);
    }

    #[test]
    fn test_move_list_hides_last_glyphs_until_finished() {
        let (mut s, clock, surface) =
            session("[Event \"x\"]\n\n1. e4 e5 2. Nf3 Nc6!? *", Side::White);
        s.on_move_attempt(Square::E2, Square::E4);
        clock.advance(Duration::from_secs(1));
        s.poll().unwrap();
        s.on_move_attempt(Square::G1, Square::F3);
        clock.advance(Duration::from_secs(1));
        s.poll().unwrap();

        assert_eq!(s.phase(), SessionPhase::Finished);
        assert_eq!(surface.last_moves(), Some("1. e4 e5\n2. Nf3 Nc6!?".to_string()));
    }
}
