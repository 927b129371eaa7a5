//! Trainer settings and their persistence
//!
//! Saves and loads [`TrainerSettings`] to/from a JSON file so that the
//! learner's preferred side and timing survive between sessions.
//!
//! # File Location
//!
//! Settings are stored in `settings.json` in the user's configuration
//! directory (see [`crate::core::config_path`]).
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings and are logged
//! - Save failures are returned to the caller; [`TrainerSettings::save`]
//!   logs them instead so a broken config directory never stops training

use super::{config_path, CoreResult};
use chess_rules::Side;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User preferences for training sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerSettings {
    /// Side the learner plays
    pub learner_side: Side,

    /// Delay before the computer answers a learner move (milliseconds)
    pub reply_delay_ms: u64,

    /// Delay before the computer's first move when the learner plays second
    pub opening_reply_delay_ms: u64,

    /// Time added to the attempt for each hint stage (seconds)
    pub hint_penalty_secs: u64,

    /// Training catalog used when the learner plays White
    pub catalog_white: PathBuf,

    /// Training catalog used when the learner plays Black
    pub catalog_black: PathBuf,

    /// Override for the achievements file location
    pub achievements_file: Option<PathBuf>,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            learner_side: Side::White,
            reply_delay_ms: 800,
            opening_reply_delay_ms: 250,
            hint_penalty_secs: 30,
            catalog_white: PathBuf::from("trainings.json"),
            catalog_black: PathBuf::from("trainings_black.json"),
            achievements_file: None,
        }
    }
}

impl TrainerSettings {
    /// Default settings file location
    pub fn default_path() -> PathBuf {
        config_path(SETTINGS_FILENAME)
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from `path`, using defaults if the file is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<TrainerSettings>(&contents) {
                Ok(settings) => {
                    info!("[SETTINGS] Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!(
                        "[SETTINGS] Failed to parse settings file at {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to read settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Save settings to the default location, logging any failure
    pub fn save(&self) {
        let path = Self::default_path();
        if let Err(e) = self.save_to(&path) {
            error!("[SETTINGS] Failed to save settings to {:?}: {}", path, e);
        }
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn opening_reply_delay(&self) -> Duration {
        Duration::from_millis(self.opening_reply_delay_ms)
    }

    pub fn hint_penalty(&self) -> Duration {
        Duration::from_secs(self.hint_penalty_secs)
    }

    /// Catalog matching the configured learner side
    pub fn catalog_for_side(&self) -> &Path {
        match self.learner_side {
            Side::White => &self.catalog_white,
            Side::Black => &self.catalog_black,
        }
    }
}
