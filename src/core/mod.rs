//! Core module - Application infrastructure shared by every trainer component
//!
//! # Contents
//!
//! - [`error`] - [`CoreError`] for settings persistence
//! - [`settings`] - [`TrainerSettings`] loaded from and saved to the user's
//!   configuration directory
//! - [`clock`] - [`Clock`] abstraction over monotonic and wall-clock time so
//!   that timers and achievement timestamps are deterministic in tests
//!
//! # File Locations
//!
//! Settings and achievements live under the platform project directories
//! resolved by `directories::ProjectDirs` for `com.trilltino.OpeningTrainer`.
//! When the platform directories cannot be resolved, the current directory is
//! used instead.

pub mod clock;
pub mod error;
pub mod settings;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult};
pub use settings::TrainerSettings;

use directories::ProjectDirs;
use std::path::PathBuf;

/// Project directories for this application, if the platform provides them
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "trilltino", "OpeningTrainer")
}

/// Path of `filename` in the user's configuration directory
///
/// Falls back to a path relative to the current directory.
pub fn config_path(filename: &str) -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(filename))
        .unwrap_or_else(|| PathBuf::from(filename))
}

/// Path of `filename` in the user's data directory
///
/// Falls back to a path relative to the current directory.
pub fn data_path(filename: &str) -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(filename))
        .unwrap_or_else(|| PathBuf::from(filename))
}
