//! Repertoire loader
//!
//! Normalizes parsed sequences into [`Line`]s and derives the repertoire's
//! target completion count.
//!
//! # Header Tags
//!
//! | Tag | Effect | Default |
//! |-----|--------|---------|
//! | `OpeningNote` | Note shown when the line is finished | empty |
//! | `TargetCompletions` | Error-free completions required (positive integer) | 5 |
//!
//! Each line carries its own tags on ply 0. The repertoire target is taken
//! from the first line.
//!
//! # Annotation Fallback
//!
//! Annotated tokens are paired with engine moves by position. When the
//! counts differ, or a token does not begin with the engine's notation, the
//! engine notation is used for display instead. This is logged and never
//! fatal.

use super::pgn::{self, ParsedSequence};
use super::record::{Line, MoveRecord, DEFAULT_TARGET_COMPLETIONS};
use super::{LoadError, LoadResult};
use chess_rules::Side;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const NOTE_TAG: &str = "OpeningNote";
const TARGET_TAG: &str = "TargetCompletions";

/// The set of lines trained together in one session
#[derive(Debug, Clone)]
pub struct Repertoire {
    name: String,
    lines: Arc<[Line]>,
    target_completions: u32,
    first_mover: Side,
}

impl Repertoire {
    /// Build a repertoire from parser output
    ///
    /// # Errors
    ///
    /// - [`LoadError::Empty`] if `sequences` is empty
    /// - [`LoadError::NoUsableLines`] if every sequence has no moves
    /// - [`LoadError::InconsistentSides`] if sides do not alternate, or lines
    ///   disagree on the first mover
    pub fn load(name: impl Into<String>, sequences: Vec<ParsedSequence>) -> LoadResult<Self> {
        let name = name.into();
        if sequences.is_empty() {
            return Err(LoadError::Empty);
        }
        let record_count = sequences.len();

        let mut lines = Vec::new();
        for (index, sequence) in sequences.into_iter().enumerate() {
            if sequence.moves.is_empty() {
                debug!("[LOADER] Skipping empty record {} of '{}'", index, name);
                continue;
            }
            let line = build_line(lines.len(), index, sequence)?;
            lines.push(line);
        }

        let Some(first) = lines.first() else {
            return Err(LoadError::NoUsableLines {
                records: record_count,
            });
        };
        let first_mover = first.first_mover().unwrap_or(Side::White);
        if let Some(line) = lines
            .iter()
            .position(|l| l.first_mover() != Some(first_mover))
        {
            return Err(LoadError::InconsistentSides { line, ply: 0 });
        }
        let target_completions = first
            .target_completions()
            .unwrap_or(DEFAULT_TARGET_COMPLETIONS);

        info!(
            "[LOADER] Loaded '{}': {} line(s), target {} completion(s)",
            name,
            lines.len(),
            target_completions
        );

        Ok(Self {
            name,
            lines: lines.into(),
            target_completions,
            first_mover,
        })
    }

    /// Parse PGN text and build a repertoire from it
    pub fn from_pgn(name: impl Into<String>, text: &str) -> LoadResult<Self> {
        if text.trim().is_empty() {
            return Err(LoadError::Empty);
        }
        Self::load(name, pgn::parse(text))
    }

    /// Read a PGN file; the repertoire is named after the file stem
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_pgn(name, &text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename, e.g. to the display name of a catalog entry
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn lines(&self) -> &Arc<[Line]> {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn target_completions(&self) -> u32 {
        self.target_completions
    }

    /// Side that plays ply 0 in every line
    pub fn first_mover(&self) -> Side {
        self.first_mover
    }
}

fn build_line(line_index: usize, record_index: usize, sequence: ParsedSequence) -> LoadResult<Line> {
    let ParsedSequence {
        moves,
        annotated_tokens,
        headers,
    } = sequence;

    let annotated = if annotated_tokens.len() == moves.len() {
        Some(annotated_tokens)
    } else {
        warn!(
            "[LOADER] Annotation mismatch in record {}: {} move(s), {} token(s). Using engine notation.",
            record_index,
            moves.len(),
            annotated_tokens.len()
        );
        None
    };

    let opening_note = headers.get(NOTE_TAG).cloned().unwrap_or_default();
    let target = headers
        .get(TARGET_TAG)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|&n| n > 0);

    let first_mover = moves[0].side;
    let mut records = Vec::with_capacity(moves.len());
    for (ply, played) in moves.into_iter().enumerate() {
        if played.side != Side::at_ply(first_mover, ply) {
            return Err(LoadError::InconsistentSides {
                line: line_index,
                ply,
            });
        }

        let annotated_notation = match annotated.as_ref().map(|tokens| &tokens[ply]) {
            Some(token) if token.starts_with(&played.san) => token.clone(),
            Some(token) => {
                warn!(
                    "[LOADER] Annotation mismatch in record {} ply {}: '{}' does not start with '{}'",
                    record_index, ply, token, played.san
                );
                played.san.clone()
            }
            None => played.san.clone(),
        };

        records.push(MoveRecord {
            ply,
            side: played.side,
            notation: played.san,
            annotated_notation,
            origin: Some(played.from),
            destination: Some(played.to),
            opening_note: if ply == 0 { opening_note.clone() } else { String::new() },
            target_completions: if ply == 0 { target } else { None },
        });
    }

    Ok(Line::new(records))
}
