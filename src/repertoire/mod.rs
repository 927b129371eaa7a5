//! Repertoire data: move records, PGN parsing, loading and catalogs
//!
//! - [`record`] - [`MoveRecord`] and [`Line`], the immutable training data
//! - [`pgn`] - raw text to [`ParsedSequence`]s
//! - [`loader`] - [`ParsedSequence`]s to a validated [`Repertoire`]
//! - [`catalog`] - the per-side list of available trainings

pub mod catalog;
pub mod error;
pub mod loader;
pub mod pgn;
pub mod record;

pub use catalog::{TrainingCatalog, TrainingCategory, TrainingOption};
pub use error::{LoadError, LoadResult};
pub use loader::Repertoire;
pub use pgn::ParsedSequence;
pub use record::{strip_annotations, Line, MoveRecord, DEFAULT_TARGET_COMPLETIONS};
