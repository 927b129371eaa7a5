//! Error types for training

use chess_rules::RulesError;

/// Errors raised while driving a training attempt
///
/// Both variants mean the repertoire and the rules engine disagree about a
/// stored move, which the loader should have prevented.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// The rules engine refused a move taken from an active line
    #[error("Rules engine rejected repertoire move '{notation}': {source}")]
    EngineRejected {
        notation: String,
        #[source]
        source: RulesError,
    },

    /// A repertoire move was applied but no active line accepted it
    #[error("Repertoire move '{notation}' left every active line")]
    ReplyDiverged { notation: String },
}

/// Result type alias for training operations
pub type TrackResult<T> = Result<T, TrackError>;
