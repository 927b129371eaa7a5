//! Integration tests for loading trainings from disk
//!
//! Builds a small catalog with PGN files in a temporary directory and loads
//! it the way the CLI does.

use chess_rules::Side;
use opening_trainer::repertoire::{LoadError, Repertoire, TrainingCatalog};
use std::fs;

const SCOTCH: &str = "[Event \"Scotch\"]
[OpeningNote \"Open the centre at once.\"]
[TargetCompletions \"3\"]

1. e4 e5 2. Nf3 Nc6 3. d4! exd4 4. Nxd4 *

[Event \"Scotch, Schmidt\"]

1. e4 e5 2. Nf3 Nc6 3. d4 exd4 4. Nxd4 Nf6 *";

#[test]
fn test_catalog_entry_loads_named_repertoire() {
    //! The catalog's display name replaces the file stem

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pgn")).unwrap();
    fs::write(dir.path().join("pgn").join("scotch.pgn"), SCOTCH).unwrap();
    let catalog_path = dir.path().join("trainings.json");
    fs::write(
        &catalog_path,
        r#"[{ "label": "Open Games", "options": [{ "name": "Scotch Game", "file": "pgn/scotch.pgn" }] }]"#,
    )
    .unwrap();

    let catalog = TrainingCatalog::load(&catalog_path).unwrap();
    let repertoire = catalog.default_entry().unwrap().load().unwrap();

    assert_eq!(repertoire.name(), "Scotch Game");
    assert_eq!(repertoire.len(), 2);
    assert_eq!(repertoire.target_completions(), 3);
    assert_eq!(repertoire.first_mover(), Side::White);

    let first = &repertoire.lines()[0];
    assert_eq!(first.opening_note(), "Open the centre at once.");
    assert_eq!(first.get(4).unwrap().annotated_notation, "d4!");
    assert_eq!(first.get(4).unwrap().notation, "d4");
}

#[test]
fn test_pgn_file_named_after_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scotch-lines.pgn");
    fs::write(&path, SCOTCH).unwrap();

    let repertoire = Repertoire::from_file(&path).unwrap();

    assert_eq!(repertoire.name(), "scotch-lines");
}

#[test]
fn test_missing_files_are_load_errors() {
    //! Unreadable sources surface as blocking load errors

    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        Repertoire::from_file(&dir.path().join("missing.pgn")),
        Err(LoadError::Io { .. })
    ));
    assert!(matches!(
        TrainingCatalog::load(&dir.path().join("trainings.json")),
        Err(LoadError::Io { .. })
    ));
}

#[test]
fn test_unplayable_records_leave_no_usable_lines() {
    //! A file whose only record is illegal cannot be trained

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pgn");
    fs::write(&path, "[Event \"x\"]\n\n1. e5 e4 *").unwrap();

    assert!(matches!(
        Repertoire::from_file(&path),
        Err(LoadError::NoUsableLines { records: 1 })
    ));
}
