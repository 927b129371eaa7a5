//! Error types for the achievement store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Achievements file I/O error
    #[error("Achievements I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Achievements file is not a valid record list
    #[error("Achievements serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Delete requested past the end of the list
    #[error("No achievement at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
