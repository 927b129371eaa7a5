//! Achievement log
//!
//! When a learner completes a repertoire the target number of times in a
//! row without errors, an [`AchievementRecord`] is appended to a persisted
//! list. The list can be browsed, sorted, pruned and cleared.
//!
//! # Storage Format
//!
//! A JSON array of `{ "date", "name", "time" }` objects. `date` is an
//! RFC 3339 timestamp; entries written by older tools may hold free-form
//! dates, which are kept verbatim and sort after parseable ones.
//!
//! Records are unique by `(date, name)`: appending a duplicate is a no-op.

pub mod error;
pub mod recorder;
pub mod sort;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use recorder::AchievementRecorder;
pub use sort::{sort_records, SortColumn, SortDirection};
pub use store::{AchievementStore, JsonFileStore, MemoryStore};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Achievements filename
pub const ACHIEVEMENTS_FILENAME: &str = "achievements.json";

/// One reached objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    /// When the objective was reached
    pub date: String,
    /// Repertoire name
    pub name: String,
    /// Total training time of the cycle, `HH:MM:SS`
    pub time: String,
}

impl AchievementRecord {
    pub fn new(timestamp: DateTime<Utc>, name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            name: name.into(),
            time: time.into(),
        }
    }

    /// `date` as a timestamp, if it is RFC 3339
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Whether `other` identifies the same achievement
    pub fn same_key(&self, other: &AchievementRecord) -> bool {
        self.date == other.date && self.name == other.name
    }

    /// `date` for display: local time when parseable, raw text otherwise
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(date) => date
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => self.date.clone(),
        }
    }
}
