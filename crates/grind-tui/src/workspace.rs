#![forbid(unsafe_code)]

//! The on-disk workspace: stores, solution files, and line diffs.
//!
//! One directory holds everything the app persists - config, credentials,
//! bookmarks, snapshots, notes, and the solution files the external editor
//! works on. The effect executor and the runtime share a [`Workspace`]
//! value; reducers never touch it.

use std::fs;
use std::path::{Path, PathBuf};

use grind_store::{
    BookmarkStore, Config, ConfigStore, CredentialStore, NoteStore, SnapshotStore, StoreResult,
};

/// Handle to the workspace directory and its typed stores.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    pub config: ConfigStore,
    pub credentials: CredentialStore,
    pub bookmarks: BookmarkStore,
    pub snapshots: SnapshotStore,
    pub notes: NoteStore,
}

impl Workspace {
    /// Open (or lazily create) the workspace rooted at `root`.
    #[must_use]
    pub fn open(root: PathBuf) -> Self {
        Self {
            config: ConfigStore::new(&root),
            credentials: CredentialStore::new(&root),
            bookmarks: BookmarkStore::new(&root),
            snapshots: SnapshotStore::new(&root),
            notes: NoteStore::new(&root),
            root,
        }
    }

    /// The workspace root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Log file path for the tracing subscriber.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.root.join("grind.log")
    }

    /// Path of the solution file for a problem slug.
    #[must_use]
    pub fn solution_path(&self, slug: &str, config: &Config) -> PathBuf {
        self.root
            .join("solutions")
            .join(format!("{slug}.{}", config.solution_extension()))
    }

    /// Ensure a solution file exists, seeding a fresh one with `seed`.
    /// Returns its path.
    pub fn ensure_solution(
        &self,
        slug: &str,
        config: &Config,
        seed: &str,
    ) -> StoreResult<PathBuf> {
        let path = self.solution_path(slug, config);
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, seed)?;
            tracing::info!(path = %path.display(), "solution file created");
        }
        Ok(path)
    }

    /// Read the solution file for a slug. Errors if it was never created.
    pub fn read_solution(&self, slug: &str, config: &Config) -> StoreResult<String> {
        Ok(fs::read_to_string(self.solution_path(slug, config))?)
    }
}

/// Unified line diff between two texts (LCS-based), `-`/`+`-prefixed with
/// unchanged lines passed through. Good enough for eyeballing how a
/// solution drifted from a snapshot; no hunk headers.
#[must_use]
pub fn line_diff(old: &str, new: &str) -> String {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let n = new_lines.len();
    let mut lengths = vec![vec![0usize; n + 1]; old_lines.len() + 1];
    for (i, old_line) in old_lines.iter().enumerate().rev() {
        for (j, new_line) in new_lines.iter().enumerate().rev() {
            lengths[i][j] = if old_line == new_line {
                lengths[i + 1][j + 1] + 1
            } else {
                lengths[i + 1][j].max(lengths[i][j + 1])
            };
        }
    }

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < old_lines.len() && j < new_lines.len() {
        if old_lines[i] == new_lines[j] {
            out.push(format!("  {}", old_lines[i]));
            i += 1;
            j += 1;
        } else if lengths[i + 1][j] >= lengths[i][j + 1] {
            out.push(format!("- {}", old_lines[i]));
            i += 1;
        } else {
            out.push(format!("+ {}", new_lines[j]));
            j += 1;
        }
    }
    for line in &old_lines[i..] {
        out.push(format!("- {line}"));
    }
    for line in &new_lines[j..] {
        out.push(format!("+ {line}"));
    }
    out.join("\n")
}
