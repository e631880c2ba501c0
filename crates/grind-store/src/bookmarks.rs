#![forbid(unsafe_code)]

//! Bookmarked problem ids.

use std::collections::BTreeSet;
use std::path::Path;

use crate::StoreResult;
use crate::json_file::JsonFile;

/// Stores the set of bookmarked problem ids.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    file: JsonFile<BTreeSet<u64>>,
}

impl BookmarkStore {
    /// Store rooted at `state_dir/bookmarks.json`.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(state_dir.join("bookmarks.json")),
        }
    }

    /// Whether a problem is bookmarked.
    #[must_use]
    pub fn has(&self, problem_id: u64) -> bool {
        self.file.load().contains(&problem_id)
    }

    /// Bookmark a problem.
    pub fn add(&self, problem_id: u64) -> StoreResult<()> {
        let mut set = self.file.load();
        set.insert(problem_id);
        self.file.save(&set)
    }

    /// Remove a bookmark.
    pub fn remove(&self, problem_id: u64) -> StoreResult<()> {
        let mut set = self.file.load();
        set.remove(&problem_id);
        self.file.save(&set)
    }

    /// All bookmarked ids in ascending order.
    #[must_use]
    pub fn list(&self) -> Vec<u64> {
        self.file.load().into_iter().collect()
    }
}
