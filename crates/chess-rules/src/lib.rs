//! Chess rules oracle for the opening trainer
//!
//! The trainer never reimplements chess rules. Everything that needs to know
//! whether a move is legal, what it is called in SAN, or whose turn it is goes
//! through the [`RulesEngine`] trait defined here.
//!
//! # Architecture
//!
//! - [`Side`]: the moving side, independent of the backing library
//! - [`PlayedMove`]: a verbose record of a move the engine accepted
//! - [`RulesEngine`]: the oracle contract consumed by the training core
//! - [`ShakmatyRules`]: the production implementation over `shakmaty`
//!
//! The engine keeps its own history stack so that a rejected (out of
//! repertoire) move can be taken back with [`RulesEngine::undo_last_move`].

mod engine;
mod error;
mod side;

pub use engine::{RulesEngine, ShakmatyRules};
pub use error::{RulesError, RulesResult};
pub use side::Side;

pub use shakmaty::{Role, Square};

/// A move the rules engine accepted and applied
///
/// `san` is the engine-canonical notation including the check (`+`) or
/// mate (`#`) suffix, matching what repertoire files are compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    pub san: String,
    pub side: Side,
    pub promotion: Option<Role>,
}

/// Parse a coordinate such as `e4` into a [`Square`]
pub fn parse_square(text: &str) -> RulesResult<Square> {
    text.trim()
        .parse::<Square>()
        .map_err(|_| RulesError::InvalidSquare {
            square: text.to_string(),
        })
}
