//! Rendering surfaces for the trainer
//!
//! The session controller never draws anything itself. It pushes positions,
//! highlights and text to a [`BoardSurface`]:
//!
//! - **terminal**: ASCII board and plain-text panels for the CLI
//! - **command**: the CLI's interactive command parser
//! - **recording**: captures every call, used by tests
//! - **move_list**: formatting of the move-list panel
//!
//! Surface calls are synchronous and made only from the controller's
//! control flow.

pub mod command;
pub mod move_list;
pub mod recording;
pub mod terminal;

pub use command::{parse_command, Command, CommandError};
pub use move_list::{format_move_list, DisplayedMove};
pub use recording::{RecordingSurface, SurfaceEvent};
pub use terminal::TerminalSurface;

use crate::training::stats::StatsView;
use chess_rules::Square;

/// Why a square is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// Piece picked up with click-to-move
    Selected,
    /// First hint stage: the piece to move
    HintPiece,
    /// Second hint stage: where it goes
    HintSquare,
}

/// Tone of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Info,
    /// Recoverable learner mistake, such as an out-of-repertoire move
    Error,
    /// Objective reached
    Success,
}

/// Render callbacks consumed by the session controller
pub trait BoardSurface {
    /// Draw the position given as FEN
    fn set_position(&mut self, fen: &str);

    fn highlight(&mut self, square: Square, kind: HighlightKind);

    fn clear_highlights(&mut self);

    fn show_message(&mut self, message: &str, kind: MessageKind);

    /// Move-list panel contents
    fn show_moves(&mut self, moves: &str);

    fn show_stats(&mut self, stats: &StatsView);

    /// Opening note panel; empty clears it
    fn show_note(&mut self, note: &str);

    /// Live timer display, `MM:SS`
    fn show_timer(&mut self, timer: &str);

    /// Objective banner; `None` clears it
    fn show_objective(&mut self, objective: Option<&str>);
}
