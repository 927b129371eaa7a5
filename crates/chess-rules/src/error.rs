//! Error types for the rules oracle

/// Errors reported by a [`crate::RulesEngine`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The requested from/to pair is not a legal move in the current position
    #[error("Illegal move: {from}{to}")]
    IllegalMove { from: String, to: String },

    /// SAN text could not be parsed or does not resolve to a legal move
    #[error("Invalid notation '{notation}': {message}")]
    InvalidNotation { notation: String, message: String },

    /// Coordinate text is not a board square
    #[error("Invalid square: {square}")]
    InvalidSquare { square: String },

    /// Undo requested with an empty history
    #[error("No move to undo")]
    NothingToUndo,
}

/// Result type alias for rules operations
pub type RulesResult<T> = Result<T, RulesError>;
