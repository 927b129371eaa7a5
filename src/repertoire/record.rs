//! Move records and lines
//!
//! A [`MoveRecord`] is one ply of a memorized line: what the rules engine
//! calls the move, how the source file annotated it, and where the piece
//! travels (for hint highlighting). A [`Line`] is the full ordered sequence.
//!
//! Records are immutable once loaded. Lines are shared between the
//! repertoire and every attempt's active set.

use chess_rules::{Side, Square};

/// Completions required when a repertoire does not specify its own target
pub const DEFAULT_TARGET_COMPLETIONS: u32 = 5;

/// Glyphs removed by [`strip_annotations`]
pub const ANNOTATION_GLYPHS: &[char] = &['?', '!', '+', '#'];

/// One ply of a repertoire line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 0-based index within the line
    pub ply: usize,
    /// Side making this move
    pub side: Side,
    /// Engine-canonical SAN, e.g. `Nf3` or `Qh5+`
    pub notation: String,
    /// SAN as written in the source, including glyphs such as `!?`
    pub annotated_notation: String,
    pub origin: Option<Square>,
    pub destination: Option<Square>,
    /// Free text shown when the line is finished; only set on ply 0
    pub opening_note: String,
    /// Target error-free completions; only set on ply 0
    pub target_completions: Option<u32>,
}

impl MoveRecord {
    /// Whether a move the engine reported as `played` is this record
    ///
    /// The stored side may carry trailing glyphs, the played side must match
    /// exactly up to their start. Anything else after the played text (the
    /// `-O` of `O-O-O`, a promotion suffix) is a different move.
    pub fn matches(&self, played: &str) -> bool {
        self.annotated_notation
            .strip_prefix(played)
            .is_some_and(|rest| rest.chars().all(|c| ANNOTATION_GLYPHS.contains(&c)))
    }

    /// Whether this record moves between the same squares as `other`
    pub fn same_squares(&self, other: &MoveRecord) -> bool {
        self.origin == other.origin && self.destination == other.destination
    }
}

/// Remove annotation glyphs (`?`, `!`, `+`, `#`) from a notation
pub fn strip_annotations(notation: &str) -> String {
    notation
        .chars()
        .filter(|c| !ANNOTATION_GLYPHS.contains(c))
        .collect()
}

/// One memorized continuation
///
/// Ply indices are contiguous from 0 and sides alternate from the first
/// mover; [`crate::repertoire::Repertoire::load`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    records: Vec<MoveRecord>,
}

impl Line {
    pub(crate) fn new(records: Vec<MoveRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, ply: usize) -> Option<&MoveRecord> {
        self.records.get(ply)
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Side of the first record
    pub fn first_mover(&self) -> Option<Side> {
        self.records.first().map(|r| r.side)
    }

    pub fn opening_note(&self) -> &str {
        self.records
            .first()
            .map(|r| r.opening_note.as_str())
            .unwrap_or("")
    }

    pub fn target_completions(&self) -> Option<u32> {
        self.records.first().and_then(|r| r.target_completions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(annotated: &str, notation: &str) -> MoveRecord {
        MoveRecord {
            ply: 0,
            side: Side::White,
            notation: notation.to_string(),
            annotated_notation: annotated.to_string(),
            origin: None,
            destination: None,
            opening_note: String::new(),
            target_completions: None,
        }
    }

    #[test]
    fn test_matches_tolerates_trailing_glyphs() {
        //! Stored "Nf3!?" matches the played "Nf3"
        let r = record("Nf3!?", "Nf3");
        assert!(r.matches("Nf3"));
        assert!(!r.matches("Nc3"), "Different move must not match");
    }

    #[test]
    fn test_matches_requires_played_prefix() {
        //! A played check "Qh5+" does not match a stored "Qh5" lacking the suffix
        let r = record("Qh5", "Qh5");
        assert!(!r.matches("Qh5+"));
    }

    #[test]
    fn test_matches_rejects_longer_move() {
        //! Short castling is not long castling, and a pawn push is not a promotion
        assert!(!record("O-O-O", "O-O-O").matches("O-O"));
        assert!(record("O-O-O!", "O-O-O").matches("O-O-O"));
        assert!(!record("e8=Q", "e8=Q").matches("e8"));
        assert!(record("Nf3!?", "Nf3").matches("Nf3"));
    }

    #[test]
    fn test_strip_annotations() {
        //! Glyphs are removed while the move itself is untouched
        assert_eq!(strip_annotations("Bxf7+!!"), "Bxf7");
        assert_eq!(strip_annotations("e8=Q#"), "e8=Q");
        assert_eq!(strip_annotations("O-O"), "O-O");
    }
}
