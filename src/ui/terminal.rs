//! Plain-text surface for the CLI
//!
//! Draws an ASCII board from the FEN placement field, oriented for the
//! learner's side, and prints panels as labelled text lines. Squares with a
//! highlight are drawn in brackets: `[N]` for a selection, `(N)` for the
//! hinted piece and `<.>` for the hinted destination.

use super::{BoardSurface, HighlightKind, MessageKind};
use crate::training::stats::StatsView;
use chess_rules::{Side, Square};
use std::io::{self, Write};
use tracing::warn;

pub struct TerminalSurface<W: Write> {
    out: W,
    orientation: Side,
    fen: String,
    highlights: Vec<(Square, HighlightKind)>,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(orientation: Side) -> Self {
        Self::new(io::stdout(), orientation)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, orientation: Side) -> Self {
        Self {
            out,
            orientation,
            fen: String::new(),
            highlights: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw the current position with its highlights
    pub fn render(&mut self) {
        let board = render_board(&self.fen, self.orientation, &self.highlights);
        self.emit(&board);
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("[UI] Failed to write to terminal: {}", e);
        }
    }
}

/// Expand a FEN placement field into `board[rank][file]`, rank 0 = rank 1
fn placement_grid(fen: &str) -> [[char; 8]; 8] {
    let mut grid = [['.'; 8]; 8];
    let placement = fen.split_whitespace().next().unwrap_or("");
    for (row, rank_text) in placement.split('/').take(8).enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
            } else if file < 8 {
                grid[rank][file] = c;
                file += 1;
            }
        }
    }
    grid
}

fn render_board(fen: &str, orientation: Side, highlights: &[(Square, HighlightKind)]) -> String {
    let grid = placement_grid(fen);
    let ranks: Vec<usize> = match orientation {
        Side::White => (0..8).rev().collect(),
        Side::Black => (0..8).collect(),
    };
    let files: Vec<usize> = match orientation {
        Side::White => (0..8).collect(),
        Side::Black => (0..8).rev().collect(),
    };

    let mut out = String::new();
    for &rank in &ranks {
        out.push_str(&format!("{} ", rank + 1));
        for &file in &files {
            let piece = grid[rank][file];
            let name = format!("{}{}", (b'a' + file as u8) as char, rank + 1);
            let kind = highlights
                .iter()
                .rev()
                .find(|(sq, _)| sq.to_string() == name)
                .map(|(_, kind)| *kind);
            let cell = match kind {
                Some(HighlightKind::Selected) => format!("[{}]", piece),
                Some(HighlightKind::HintPiece) => format!("({})", piece),
                Some(HighlightKind::HintSquare) => format!("<{}>", piece),
                None => format!(" {} ", piece),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for &file in &files {
        out.push_str(&format!(" {} ", (b'a' + file as u8) as char));
    }
    out
}

impl<W: Write> BoardSurface for TerminalSurface<W> {
    fn set_position(&mut self, fen: &str) {
        self.fen = fen.to_string();
        self.render();
    }

    fn highlight(&mut self, square: Square, kind: HighlightKind) {
        self.highlights.push((square, kind));
        let label = match kind {
            HighlightKind::Selected => "selected",
            HighlightKind::HintPiece => "hint: move the piece on",
            HighlightKind::HintSquare => "hint: to",
        };
        self.emit(&format!("* {} {}", label, square));
    }

    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    fn show_message(&mut self, message: &str, kind: MessageKind) {
        let prefix = match kind {
            MessageKind::Info => ">",
            MessageKind::Error => "!",
            MessageKind::Success => "*",
        };
        self.emit(&format!("{} {}", prefix, message));
    }

    fn show_moves(&mut self, moves: &str) {
        if !moves.is_empty() {
            self.emit(&format!("Moves:\n{}", moves));
        }
    }

    fn show_stats(&mut self, stats: &StatsView) {
        self.emit(&format!(
            "Completions: {}  Errors: {}  Total: {}  Avg: {}  Best: {}",
            stats.completions, stats.errors, stats.total_time, stats.average_time, stats.min_time
        ));
    }

    fn show_note(&mut self, note: &str) {
        if !note.is_empty() {
            self.emit(&format!("Note: {}", note));
        }
    }

    fn show_timer(&mut self, timer: &str) {
        self.emit(&format!("Timer: {}", timer));
    }

    fn show_objective(&mut self, objective: Option<&str>) {
        if let Some(objective) = objective {
            self.emit(&format!("*** {} ***", objective));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_board_white_orientation() {
        //! White's view has rank 8 on top and files a to h
        let board = render_board(START, Side::White, &[]);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines[0], "8  r  n  b  q  k  b  n  r ");
        assert_eq!(lines[7], "1  R  N  B  Q  K  B  N  R ");
        assert_eq!(lines[8], "   a  b  c  d  e  f  g  h ");
    }

    #[test]
    fn test_board_black_orientation_and_highlight() {
        //! Black's view is flipped; a hinted piece is bracketed
        let board = render_board(START, Side::Black, &[(Square::E7, HighlightKind::HintPiece)]);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines[0], "1  R  N  B  K  Q  B  N  R ");
        assert_eq!(lines[6], "7  p  p  p (p) p  p  p  p ");
        assert_eq!(lines[8], "   h  g  f  e  d  c  b  a ");
    }

    #[test]
    fn test_messages_written_to_output() {
        let mut surface = TerminalSurface::new(Vec::new(), Side::White);
        surface.show_message("Your turn.", MessageKind::Info);
        surface.show_note("");

        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(text, "> Your turn.\n");
    }
}
