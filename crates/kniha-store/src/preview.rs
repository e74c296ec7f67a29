//! In-memory store for generation runs awaiting confirmation
//!
//! Entries live until they are taken, removed, or outlive the TTL. Nothing is
//! written to disk; a process restart drops every pending run.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use kniha_domain::model::{GenerationRun, RunId};

/// Default lifetime of a pending run
pub const DEFAULT_PREVIEW_TTL: Duration = Duration::from_secs(30 * 60);

struct PendingRun {
    run: GenerationRun,
    stored_at: Instant,
}

pub struct PreviewStore {
    ttl: Duration,
    runs: Mutex<HashMap<RunId, PendingRun>>,
}

impl Default for PreviewStore {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_TTL)
    }
}

impl PreviewStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            runs: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RunId, PendingRun>> {
        // Every critical section leaves the map consistent, so poisoning is ignored
        self.runs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_expired(&self, pending: &PendingRun, now: Instant) -> bool {
        now.duration_since(pending.stored_at) >= self.ttl
    }

    /// Store a run under its id; an existing entry with the same id is replaced
    pub fn insert(&self, run: GenerationRun) {
        let id = run.id.clone();
        let replaced = self
            .lock()
            .insert(
                id.clone(),
                PendingRun {
                    run,
                    stored_at: Instant::now(),
                },
            )
            .is_some();
        if replaced {
            log::warn!("Replaced pending generation run {}", id);
        }
    }

    /// Look at a pending run without consuming it
    pub fn get(&self, id: &RunId) -> Option<GenerationRun> {
        let now = Instant::now();
        let mut runs = self.lock();
        let expired = self.is_expired(runs.get(id)?, now);
        if expired {
            runs.remove(id);
            log::warn!("Generation run {} expired", id);
            return None;
        }
        runs.get(id).map(|pending| pending.run.clone())
    }

    /// Remove and return a pending run; a run can be taken only once
    pub fn take(&self, id: &RunId) -> Option<GenerationRun> {
        let now = Instant::now();
        let pending = self.lock().remove(id)?;
        if self.is_expired(&pending, now) {
            log::warn!("Generation run {} expired", id);
            return None;
        }
        Some(pending.run)
    }

    /// Discard a run; returns whether a live run was removed
    pub fn remove(&self, id: &RunId) -> bool {
        self.take(id).is_some()
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut runs = self.lock();
        let before = runs.len();
        runs.retain(|_, pending| now.duration_since(pending.stored_at) < self.ttl);
        before - runs.len()
    }

    /// Number of stored entries, expired ones included until purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use kniha_domain::model::{GenerationParams, GenerationStatus, GenerationSummary, KmSource};

    fn run(id: &str) -> GenerationRun {
        GenerationRun {
            id: RunId::from(id),
            params: GenerationParams::new(
                "v1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                0,
                100,
            ),
            status: GenerationStatus::Preview,
            created_at: Utc::now(),
            trips: Vec::new(),
            summary: GenerationSummary {
                total_days: 7,
                total_generated_trips: 0,
                total_km: 0,
                km_source: KmSource::Tacho,
                warnings: Vec::new(),
            },
        }
    }

    #[test]
    fn test_take_consumes_once() {
        let store = PreviewStore::default();
        store.insert(run("gen_a"));
        let id = RunId::from("gen_a");
        assert!(store.get(&id).is_some());
        assert!(store.take(&id).is_some());
        assert!(store.take(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = PreviewStore::default();
        store.insert(run("gen_b"));
        let id = RunId::from("gen_b");
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.take(&id).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let store = PreviewStore::default();
        let mut first = run("gen_c");
        first.summary.total_km = 10;
        let mut second = run("gen_c");
        second.summary.total_km = 20;
        store.insert(first);
        store.insert(second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&RunId::from("gen_c")).unwrap().summary.total_km, 20);
    }

    #[test]
    fn test_expired_runs_are_invisible() {
        let store = PreviewStore::new(Duration::ZERO);
        store.insert(run("gen_d"));
        assert_eq!(store.len(), 1);
        assert!(store.get(&RunId::from("gen_d")).is_none());
        assert!(store.is_empty());

        store.insert(run("gen_e"));
        assert!(store.take(&RunId::from("gen_e")).is_none());
    }

    #[test]
    fn test_purge_expired() {
        let store = PreviewStore::new(Duration::ZERO);
        store.insert(run("gen_f"));
        store.insert(run("gen_g"));
        assert_eq!(store.purge_expired(), 2);
        assert!(store.is_empty());

        let store = PreviewStore::default();
        store.insert(run("gen_h"));
        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 1);
    }
}
