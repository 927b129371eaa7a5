//! Error types for repertoire loading

use std::path::PathBuf;

/// Errors that prevent a repertoire (or catalog) from being used
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source text or sequence list is empty
    #[error("Repertoire source is empty")]
    Empty,

    /// Every parsed sequence was empty or unplayable
    #[error("No usable lines among {records} record(s)")]
    NoUsableLines { records: usize },

    /// A line breaks the alternating-side invariant, or lines disagree on
    /// who moves first
    #[error("Line {line} has an unexpected side to move at ply {ply}")]
    InconsistentSides { line: usize, ply: usize },

    /// Source file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Training catalog is not valid JSON of the expected shape
    #[error("Invalid training catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Result type alias for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
