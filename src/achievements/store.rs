//! Achievement persistence
//!
//! [`JsonFileStore`] keeps the list in a JSON file; [`MemoryStore`] keeps it
//! in memory, shared between clones.

use super::{AchievementRecord, StoreError, StoreResult};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

/// Ordered list of achievements, keyed by insertion order
pub trait AchievementStore {
    fn list(&self) -> StoreResult<Vec<AchievementRecord>>;

    /// Append unless a record with the same `(date, name)` exists
    ///
    /// Returns whether the record was added.
    fn append(&mut self, record: AchievementRecord) -> StoreResult<bool>;

    /// Remove and return the record at `index`
    fn delete(&mut self, index: usize) -> StoreResult<AchievementRecord>;

    fn clear(&mut self) -> StoreResult<()>;
}

fn append_unique(records: &mut Vec<AchievementRecord>, record: AchievementRecord) -> bool {
    if records.iter().any(|saved| saved.same_key(&record)) {
        debug!(
            "[ACHIEVEMENTS] '{}' at {} already saved",
            record.name, record.date
        );
        return false;
    }
    records.push(record);
    true
}

fn remove_at(records: &mut Vec<AchievementRecord>, index: usize) -> StoreResult<AchievementRecord> {
    if index >= records.len() {
        return Err(StoreError::IndexOutOfRange {
            index,
            len: records.len(),
        });
    }
    Ok(records.remove(index))
}

/// Achievements in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the user's data directory
    pub fn default_location() -> Self {
        Self::new(crate::core::data_path(super::ACHIEVEMENTS_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[AchievementRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }
}

impl AchievementStore for JsonFileStore {
    fn list(&self) -> StoreResult<Vec<AchievementRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn append(&mut self, record: AchievementRecord) -> StoreResult<bool> {
        let mut records = self.list()?;
        let added = append_unique(&mut records, record);
        if added {
            self.write(&records)?;
            info!("[ACHIEVEMENTS] Saved achievement to {:?}", self.path);
        }
        Ok(added)
    }

    fn delete(&mut self, index: usize) -> StoreResult<AchievementRecord> {
        let mut records = self.list()?;
        let removed = remove_at(&mut records, index)?;
        self.write(&records)?;
        Ok(removed)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.write(&[])?;
        info!("[ACHIEVEMENTS] Cleared {:?}", self.path);
        Ok(())
    }
}

/// Achievements held in memory
///
/// Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<Vec<AchievementRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AchievementStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<AchievementRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn append(&mut self, record: AchievementRecord) -> StoreResult<bool> {
        Ok(append_unique(&mut self.records.borrow_mut(), record))
    }

    fn delete(&mut self, index: usize) -> StoreResult<AchievementRecord> {
        remove_at(&mut self.records.borrow_mut(), index)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.records.borrow_mut().clear();
        Ok(())
    }
}
