//! Two-stage hint protocol
//!
//! 1. First request: reveal the origin square of the next repertoire move
//! 2. Second request: reveal its destination, if that move is still a valid
//!    option; otherwise the stale hint is dropped and stage 1 restarts for
//!    the current position
//!
//! Any move attempt or reset clears the state back to [`HintState::None`].
//! The caller applies one time penalty per revealed stage.

use crate::repertoire::MoveRecord;
use chess_rules::Square;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HintState {
    #[default]
    None,
    PieceHinted(MoveRecord),
    SquareHinted(MoveRecord),
}

/// What a hint request revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// No repertoire move is available to hint
    Unavailable,
    /// Origin square of the hinted move
    PieceRevealed(Square),
    /// Destination square of the hinted move
    SquareRevealed(Square),
    /// Both stages already shown for this turn
    AlreadyRevealed,
}

impl HintOutcome {
    /// Whether this outcome costs a time penalty
    pub fn is_penalized(&self) -> bool {
        matches!(self, HintOutcome::PieceRevealed(_) | HintOutcome::SquareRevealed(_))
    }
}

impl HintState {
    /// Advance the hint given the learner's current `options`
    pub fn request(&mut self, options: &[&MoveRecord]) -> HintOutcome {
        match self {
            HintState::None => {
                let Some(next) = options.first() else {
                    return HintOutcome::Unavailable;
                };
                let Some(origin) = next.origin else {
                    return HintOutcome::Unavailable;
                };
                *self = HintState::PieceHinted((*next).clone());
                HintOutcome::PieceRevealed(origin)
            }
            HintState::PieceHinted(hinted) => {
                let still_valid = options.iter().any(|o| o.same_squares(hinted));
                match (still_valid, hinted.destination) {
                    (true, Some(destination)) => {
                        *self = HintState::SquareHinted(hinted.clone());
                        HintOutcome::SquareRevealed(destination)
                    }
                    _ => {
                        debug!("[HINT] Hint for '{}' is stale, restarting", hinted.notation);
                        *self = HintState::None;
                        self.request(options)
                    }
                }
            }
            HintState::SquareHinted(_) => HintOutcome::AlreadyRevealed,
        }
    }

    pub fn clear(&mut self) {
        *self = HintState::None;
    }

    /// The move currently being hinted
    pub fn hinted(&self) -> Option<&MoveRecord> {
        match self {
            HintState::None => None,
            HintState::PieceHinted(m) | HintState::SquareHinted(m) => Some(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::{parse_square, Side};

    fn record(notation: &str, from: &str, to: &str) -> MoveRecord {
        MoveRecord {
            ply: 0,
            side: Side::White,
            notation: notation.to_string(),
            annotated_notation: notation.to_string(),
            origin: Some(parse_square(from).unwrap()),
            destination: Some(parse_square(to).unwrap()),
            opening_note: String::new(),
            target_completions: None,
        }
    }

    #[test]
    fn test_two_stage_reveal() {
        //! Piece first, then destination, then nothing more
        let e4 = record("e4", "e2", "e4");
        let mut hint = HintState::default();

        assert_eq!(hint.request(&[&e4]), HintOutcome::PieceRevealed(parse_square("e2").unwrap()));
        assert_eq!(hint.request(&[&e4]), HintOutcome::SquareRevealed(parse_square("e4").unwrap()));
        assert_eq!(hint.request(&[&e4]), HintOutcome::AlreadyRevealed);
        assert!(!HintOutcome::AlreadyRevealed.is_penalized());
    }

    #[test]
    fn test_stale_hint_restarts_stage_one() {
        //! If the hinted move is no longer an option, stage 1 runs for the new state
        let e4 = record("e4", "e2", "e4");
        let nf3 = record("Nf3", "g1", "f3");
        let mut hint = HintState::default();
        hint.request(&[&e4]);

        let outcome = hint.request(&[&nf3]);

        assert_eq!(outcome, HintOutcome::PieceRevealed(parse_square("g1").unwrap()));
        assert_eq!(hint.hinted().map(|m| m.notation.as_str()), Some("Nf3"));
    }

    #[test]
    fn test_no_options_is_unavailable() {
        //! Nothing to hint leaves the state untouched
        let mut hint = HintState::default();
        assert_eq!(hint.request(&[]), HintOutcome::Unavailable);
        assert_eq!(hint, HintState::None);
    }

    #[test]
    fn test_clear_rearms() {
        //! After clearing, the next request starts at stage 1 again
        let e4 = record("e4", "e2", "e4");
        let mut hint = HintState::default();
        hint.request(&[&e4]);
        hint.request(&[&e4]);

        hint.clear();

        assert!(matches!(hint.request(&[&e4]), HintOutcome::PieceRevealed(_)));
    }
}
