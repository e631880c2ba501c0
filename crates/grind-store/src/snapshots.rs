#![forbid(unsafe_code)]

//! Code snapshot storage.
//!
//! Snapshots are point-in-time copies of a solution file, kept per problem
//! so the diff panel can compare an older attempt against the current
//! file.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::StoreResult;
use crate::json_file::JsonFile;

/// A saved copy of a solution file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: u64,
    pub problem_id: u64,
    pub label: String,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
    pub code: String,
}

/// Stores snapshots for all problems in one JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    file: JsonFile<Vec<Snapshot>>,
}

impl SnapshotStore {
    /// Store rooted at `state_dir/snapshots.json`.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(state_dir.join("snapshots.json")),
        }
    }

    /// Snapshots for one problem, newest first.
    #[must_use]
    pub fn list(&self, problem_id: u64) -> Vec<Snapshot> {
        let mut snapshots: Vec<Snapshot> = self
            .file
            .load()
            .into_iter()
            .filter(|s| s.problem_id == problem_id)
            .collect();
        snapshots.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        snapshots
    }

    /// One snapshot by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<Snapshot> {
        self.file.load().into_iter().find(|s| s.id == id)
    }

    /// Save a new snapshot and return it.
    pub fn save(&self, problem_id: u64, label: &str, code: &str) -> StoreResult<Snapshot> {
        let mut all = self.file.load();
        let id = all.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let snapshot = Snapshot {
            id,
            problem_id,
            label: label.to_string(),
            created_at,
            code: code.to_string(),
        };
        all.push(snapshot.clone());
        self.file.save(&all)?;
        Ok(snapshot)
    }

    /// Delete a snapshot by id.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let mut all = self.file.load();
        all.retain(|s| s.id != id);
        self.file.save(&all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_assigns_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let a = store.save(1, "first", "fn a() {}").unwrap();
        let b = store.save(1, "second", "fn b() {}").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn list_filters_by_problem() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        store.save(1, "p1", "a").unwrap();
        store.save(2, "p2", "b").unwrap();
        let snapshots = store.list(1);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].label, "p1");
    }

    #[test]
    fn get_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let snap = store.save(1, "x", "code").unwrap();
        assert_eq!(store.get(snap.id).unwrap().code, "code");
        store.delete(snap.id).unwrap();
        assert!(store.get(snap.id).is_none());
    }

    #[test]
    fn newest_sorts_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        store.save(1, "old", "a").unwrap();
        let newest = store.save(1, "new", "b").unwrap();
        assert_eq!(store.list(1)[0].id, newest.id);
    }
}
