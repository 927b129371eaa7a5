//! Turns a reached objective into a stored achievement

use super::{AchievementRecord, AchievementStore, StoreResult};
use crate::training::stats::{format_time, SessionStats};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub struct AchievementRecorder {
    store: Box<dyn AchievementStore>,
}

impl AchievementRecorder {
    pub fn new(store: Box<dyn AchievementStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn AchievementStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn AchievementStore {
        self.store.as_mut()
    }

    /// Append an achievement for `name` when `stats` has reached its target
    ///
    /// Returns the new record, or `None` when the target is not reached or
    /// the same achievement was already stored.
    pub fn record_if_target_reached(
        &mut self,
        stats: &SessionStats,
        name: &str,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<Option<AchievementRecord>> {
        if !stats.target_reached() {
            return Ok(None);
        }

        let record = AchievementRecord::new(timestamp, name, format_time(stats.total_time));
        if self.store.append(record.clone())? {
            info!(
                "[ACHIEVEMENTS] '{}' completed {} time(s) in {}",
                record.name, stats.target, record.time
            );
            Ok(Some(record))
        } else {
            warn!("[ACHIEVEMENTS] Duplicate achievement for '{}' skipped", name);
            Ok(None)
        }
    }
}

impl std::fmt::Debug for AchievementRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementRecorder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::MemoryStore;
    use chrono::TimeZone;
    use std::time::Duration;

    fn finished_stats(target: u32, successes: u32) -> SessionStats {
        let mut stats = SessionStats::new(target);
        for _ in 0..successes {
            stats.record_attempt_start();
            stats.record_finish(Some(Duration::from_secs(42)), false);
        }
        stats
    }

    #[test]
    fn test_nothing_recorded_below_target() {
        let store = MemoryStore::new();
        let mut recorder = AchievementRecorder::new(Box::new(store.clone()));

        let recorded = recorder
            .record_if_target_reached(&finished_stats(3, 2), "Scotch", Utc::now())
            .unwrap();

        assert!(recorded.is_none());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_recording_is_idempotent() {
        //! The same objective at the same instant is stored once
        let store = MemoryStore::new();
        let mut recorder = AchievementRecorder::new(Box::new(store.clone()));
        let stats = finished_stats(2, 2);
        let stamp = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();

        let first = recorder.record_if_target_reached(&stats, "Scotch", stamp).unwrap();
        let second = recorder.record_if_target_reached(&stats, "Scotch", stamp).unwrap();

        assert_eq!(first.map(|r| r.time), Some("00:01:24".to_string()));
        assert!(second.is_none());
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
