//! Move-list panel formatting

use crate::repertoire::strip_annotations;
use chess_rules::Side;

/// One entry of the move list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedMove {
    pub side: Side,
    /// Notation as stored, annotations included
    pub notation: String,
}

impl DisplayedMove {
    pub fn new(side: Side, notation: impl Into<String>) -> Self {
        Self {
            side,
            notation: notation.into(),
        }
    }
}

/// Format `moves` as numbered rows, one full move per line
///
/// While the attempt is `in_progress` the last move is shown without
/// annotation glyphs, so the list does not give away the evaluation of the
/// move the learner is about to answer.
pub fn format_move_list(moves: &[DisplayedMove], in_progress: bool) -> String {
    let mut rows: Vec<String> = Vec::new();
    let mut number = 1;
    let last = moves.len().saturating_sub(1);

    for (i, m) in moves.iter().enumerate() {
        let shown = if in_progress && i == last {
            strip_annotations(&m.notation)
        } else {
            m.notation.clone()
        };

        match m.side {
            Side::White => rows.push(format!("{}. {}", number, shown)),
            Side::Black => {
                // ply 0 by Black, or Black after a White row
                match rows.last_mut() {
                    Some(row) if i > 0 && moves[i - 1].side == Side::White => {
                        row.push(' ');
                        row.push_str(&shown);
                    }
                    _ => rows.push(format!("{}... {}", number, shown)),
                }
                number += 1;
            }
        }
    }
    rows.join("\n")
}
