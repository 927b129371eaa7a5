use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::fmt;

/// The side making a move
///
/// White is always the first mover from the standard starting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    /// The other side
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Single-letter code (`w` / `b`)
    pub fn code(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// Side to move at a given 0-based ply from the starting position
    pub fn at_ply(first_mover: Side, ply: usize) -> Side {
        if ply % 2 == 0 {
            first_mover
        } else {
            first_mover.opponent()
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_alternates_by_ply() {
        //! Even plies belong to the first mover, odd plies to the other side
        assert_eq!(Side::at_ply(Side::White, 0), Side::White);
        assert_eq!(Side::at_ply(Side::White, 1), Side::Black);
        assert_eq!(Side::at_ply(Side::Black, 2), Side::Black);
        assert_eq!(Side::at_ply(Side::Black, 3), Side::White);
    }

    #[test]
    fn test_side_opponent_and_code() {
        //! Opponent flips the side; codes match the single-letter convention
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.code(), 'w');
        assert_eq!(Side::Black.code(), 'b');
    }
}
