//! Training catalog
//!
//! A JSON list of categories, each holding named repertoire files:
//!
//! ```json
//! [
//!   { "label": "Open Games", "options": [
//!       { "name": "Italian Game", "file": "pgn/italian.pgn" }
//!   ] }
//! ]
//! ```
//!
//! Relative `file` paths are resolved against the catalog's own directory.
//! One catalog exists per learner side (`trainings.json` for White,
//! `trainings_black.json` for Black).

use super::{LoadError, LoadResult, Repertoire};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingOption {
    pub name: String,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCategory {
    pub label: String,
    #[serde(default)]
    pub options: Vec<TrainingOption>,
}

/// All trainings available for one learner side
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrainingCatalog {
    categories: Vec<TrainingCategory>,
}

impl TrainingCatalog {
    /// Parse a catalog from JSON text, resolving files against `base_dir`
    pub fn from_json(text: &str, base_dir: &Path) -> LoadResult<Self> {
        let mut categories: Vec<TrainingCategory> = serde_json::from_str(text)?;
        for option in categories.iter_mut().flat_map(|c| c.options.iter_mut()) {
            if option.file.is_relative() {
                option.file = base_dir.join(&option.file);
            }
        }
        Ok(Self { categories })
    }

    /// Read a catalog file
    pub fn load(path: &Path) -> LoadResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let catalog = Self::from_json(&text, base_dir)?;
        info!(
            "[CATALOG] Loaded {} training(s) in {} category group(s) from {:?}",
            catalog.entries().count(),
            catalog.categories.len(),
            path
        );
        Ok(catalog)
    }

    pub fn categories(&self) -> &[TrainingCategory] {
        &self.categories
    }

    /// Every `(category label, option)` pair in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TrainingOption)> {
        self.categories
            .iter()
            .flat_map(|c| c.options.iter().map(move |o| (c.label.as_str(), o)))
    }

    /// The training selected when nothing else is chosen
    ///
    /// Only the first category's first option qualifies, even if a later
    /// category has options.
    pub fn default_entry(&self) -> Option<&TrainingOption> {
        self.categories.first().and_then(|c| c.options.first())
    }

    /// Find a training by name, ignoring ASCII case
    pub fn find(&self, name: &str) -> Option<&TrainingOption> {
        self.entries()
            .map(|(_, option)| option)
            .find(|option| option.name.eq_ignore_ascii_case(name))
    }
}

impl TrainingOption {
    /// Load this option's repertoire under its display name
    pub fn load(&self) -> LoadResult<Repertoire> {
        Ok(Repertoire::from_file(&self.file)?.with_name(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        { "label": "Open Games", "options": [
            { "name": "Italian Game", "file": "italian.pgn" },
            { "name": "Scotch", "file": "/abs/scotch.pgn" }
        ] },
        { "label": "Closed Games", "options": [
            { "name": "Queen's Gambit", "file": "qgd.pgn" }
        ] }
    ]"#;

    #[test]
    fn test_relative_files_resolved_against_catalog_dir() {
        //! Relative paths gain the catalog directory, absolute ones are kept
        let catalog = TrainingCatalog::from_json(CATALOG, Path::new("/data")).unwrap();

        assert_eq!(catalog.find("italian game").unwrap().file, Path::new("/data/italian.pgn"));
        assert_eq!(catalog.find("Scotch").unwrap().file, Path::new("/abs/scotch.pgn"));
    }

    #[test]
    fn test_default_entry_is_first_option() {
        //! The first option of the first category is the default training
        let catalog = TrainingCatalog::from_json(CATALOG, Path::new(".")).unwrap();

        assert_eq!(catalog.default_entry().unwrap().name, "Italian Game");
        assert_eq!(catalog.entries().count(), 3);
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        //! A catalog that is not a list of categories cannot be loaded
        let result = TrainingCatalog::from_json(r#"{"label": "x"}"#, Path::new("."));
        assert!(matches!(result, Err(LoadError::Catalog(_))));
    }

    #[test]
    fn test_option_loads_repertoire_under_display_name() {
        //! Loading an option names the repertoire after the option
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("italian.pgn"), "[Event \"x\"]\n\n1. e4 e5 2. Nf3 *").unwrap();
        let catalog = TrainingCatalog::from_json(CATALOG, dir.path()).unwrap();

        let repertoire = catalog.default_entry().unwrap().load().unwrap();

        assert_eq!(repertoire.name(), "Italian Game");
        assert_eq!(repertoire.lines()[0].len(), 3);
    }
}
