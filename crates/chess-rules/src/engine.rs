//! Rules engine trait and the shakmaty-backed implementation
//!
//! # Coordinate System
//!
//! Moves are addressed by origin and destination squares the way a board
//! surface reports drags and clicks. Castling is addressed by the king's
//! origin and destination (`e1` to `g1`), not by the rook square.

use crate::{PlayedMove, RulesError, RulesResult, Side};
use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, Role, Square};
use tracing::debug;

/// Legal-move oracle consumed by the training core
///
/// Implementations are synchronous and non-reentrant; the trainer calls them
/// only from its main control flow.
pub trait RulesEngine {
    /// Apply the move from `from` to `to`, promoting to `promotion` when the
    /// move is a pawn reaching the last rank
    fn apply_move(&mut self, from: Square, to: Square, promotion: Role)
        -> RulesResult<PlayedMove>;

    /// Apply a move given in SAN (check/mate suffix optional)
    fn apply_san(&mut self, san: &str) -> RulesResult<PlayedMove>;

    /// Side whose turn it is
    fn side_to_move(&self) -> Side;

    /// FEN of the current position
    fn position_snapshot(&self) -> String;

    /// Verbose history of all applied moves, oldest first
    fn move_history(&self) -> &[PlayedMove];

    /// SAN-only history of all applied moves
    fn san_history(&self) -> Vec<String> {
        self.move_history().iter().map(|m| m.san.clone()).collect()
    }

    /// Take back the last applied move
    fn undo_last_move(&mut self) -> RulesResult<PlayedMove>;

    /// All legal moves in the current position
    fn legal_moves(&self) -> Vec<PlayedMove>;

    /// Owner of the piece standing on `square`, if any
    fn piece_side_at(&self, square: Square) -> Option<Side>;

    /// Return to the standard starting position with an empty history
    fn reset(&mut self);
}

/// [`RulesEngine`] over `shakmaty::Chess`
///
/// shakmaty positions are immutable values, so undo is a stack of the
/// positions preceding each applied move.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyRules {
    position: Chess,
    previous: Vec<Chess>,
    history: Vec<PlayedMove>,
}

impl ShakmatyRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying shakmaty position
    pub fn position(&self) -> &Chess {
        &self.position
    }

    fn coordinates(m: &Move) -> (Square, Square) {
        match m.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, .. } => (from, to),
            _ => (m.from().unwrap_or_else(|| m.to()), m.to()),
        }
    }

    fn describe(position: &Chess, m: &Move) -> PlayedMove {
        let (from, to) = Self::coordinates(m);
        let mut after = position.clone();
        let base = San::from_move(position, m).to_string();
        after.play_unchecked(m);
        PlayedMove {
            from,
            to,
            san: format!("{}{}", base, Self::check_suffix(&after)),
            side: position.turn().into(),
            promotion: m.promotion(),
        }
    }

    fn check_suffix(position: &Chess) -> &'static str {
        if position.is_checkmate() {
            "#"
        } else if position.is_check() {
            "+"
        } else {
            ""
        }
    }

    fn play(&mut self, m: &Move) -> PlayedMove {
        let played = Self::describe(&self.position, m);
        self.previous.push(self.position.clone());
        self.position.play_unchecked(m);
        self.history.push(played.clone());
        debug!("[RULES] Applied {} ({}{})", played.san, played.from, played.to);
        played
    }
}

impl RulesEngine for ShakmatyRules {
    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Role,
    ) -> RulesResult<PlayedMove> {
        let candidate = self
            .position
            .legal_moves()
            .into_iter()
            .filter(|m| Self::coordinates(m) == (from, to))
            .find(|m| m.promotion().map_or(true, |role| role == promotion));

        match candidate {
            Some(m) => Ok(self.play(&m)),
            None => Err(RulesError::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    fn apply_san(&mut self, san: &str) -> RulesResult<PlayedMove> {
        let parsed: SanPlus = san.parse().map_err(|_| RulesError::InvalidNotation {
            notation: san.to_string(),
            message: "not SAN".to_string(),
        })?;
        let m = parsed
            .san
            .to_move(&self.position)
            .map_err(|e| RulesError::InvalidNotation {
                notation: san.to_string(),
                message: e.to_string(),
            })?;
        Ok(self.play(&m))
    }

    fn side_to_move(&self) -> Side {
        self.position.turn().into()
    }

    fn position_snapshot(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    fn move_history(&self) -> &[PlayedMove] {
        &self.history
    }

    fn undo_last_move(&mut self) -> RulesResult<PlayedMove> {
        let restored = self.previous.pop().ok_or(RulesError::NothingToUndo)?;
        self.position = restored;
        self.history.pop().ok_or(RulesError::NothingToUndo)
    }

    fn legal_moves(&self) -> Vec<PlayedMove> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| Self::describe(&self.position, m))
            .collect()
    }

    fn piece_side_at(&self, square: Square) -> Option<Side> {
        self.position.board().color_at(square).map(Side::from)
    }

    fn reset(&mut self) {
        self.position = Chess::default();
        self.previous.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_square;

    fn sq(text: &str) -> Square {
        parse_square(text).unwrap()
    }

    #[test]
    fn test_apply_move_reports_san() {
        //! A legal drag from e2 to e4 is accepted and named in SAN
        let mut rules = ShakmatyRules::new();
        let played = rules.apply_move(sq("e2"), sq("e4"), Role::Queen).unwrap();

        assert_eq!(played.san, "e4");
        assert_eq!(played.side, Side::White);
        assert_eq!(rules.side_to_move(), Side::Black, "Turn should pass to Black");
    }

    #[test]
    fn test_illegal_move_rejected() {
        //! Moving a pawn three squares is refused and leaves the position unchanged
        let mut rules = ShakmatyRules::new();
        let before = rules.position_snapshot();

        let result = rules.apply_move(sq("e2"), sq("e5"), Role::Queen);

        assert!(matches!(result, Err(RulesError::IllegalMove { .. })));
        assert_eq!(rules.position_snapshot(), before);
        assert!(rules.move_history().is_empty());
    }

    #[test]
    fn test_undo_restores_previous_position() {
        //! Undo returns to the exact position before the last move
        let mut rules = ShakmatyRules::new();
        let start = rules.position_snapshot();
        rules.apply_san("d4").unwrap();

        let undone = rules.undo_last_move().unwrap();

        assert_eq!(undone.san, "d4");
        assert_eq!(rules.position_snapshot(), start);
        assert_eq!(rules.undo_last_move(), Err(RulesError::NothingToUndo));
    }

    #[test]
    fn test_check_suffix_included() {
        //! SAN of a checking move carries the '+' suffix
        let mut rules = ShakmatyRules::new();
        for san in ["e4", "f5", "Qh5"] {
            rules.apply_san(san).unwrap();
        }
        assert_eq!(rules.san_history(), vec!["e4", "f5", "Qh5+"]);
    }

    #[test]
    fn test_castling_addressed_by_king_squares() {
        //! Short castling is applied by dragging the king from e1 to g1
        let mut rules = ShakmatyRules::new();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"] {
            rules.apply_san(san).unwrap();
        }

        let played = rules.apply_move(sq("e1"), sq("g1"), Role::Queen).unwrap();

        assert_eq!(played.san, "O-O");
        assert_eq!(played.to, sq("g1"));
    }

    #[test]
    fn test_piece_side_at() {
        //! Occupancy queries report the owner of a square
        let rules = ShakmatyRules::new();
        assert_eq!(rules.piece_side_at(sq("e2")), Some(Side::White));
        assert_eq!(rules.piece_side_at(sq("e7")), Some(Side::Black));
        assert_eq!(rules.piece_side_at(sq("e4")), None);
    }

    #[test]
    fn test_legal_moves_from_start() {
        //! Twenty legal moves exist in the starting position
        let rules = ShakmatyRules::new();
        assert_eq!(rules.legal_moves().len(), 20);
    }
}
