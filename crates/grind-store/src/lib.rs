#![forbid(unsafe_code)]

//! File-backed persistence for the grind TUI.
//!
//! Small JSON stores for everything the runtime persists between sessions:
//! credentials, per-workspace config, code snapshots, bookmarks, and
//! per-problem notes. All operations are synchronous and cheap - callers
//! treat them as never meaningfully blocking.
//!
//! # Durability rules
//!
//! 1. Writes are atomic: serialize to a sibling temp file, then rename.
//! 2. Loads degrade: a missing file is first-run state, a corrupt file is
//!    logged and replaced by defaults. Neither panics, neither errors.
//! 3. Parent directories are created on demand.

pub mod bookmarks;
pub mod config;
pub mod credentials;
pub mod json_file;
pub mod notes;
pub mod snapshots;

pub use bookmarks::BookmarkStore;
pub use config::{Config, ConfigStore};
pub use credentials::{Credentials, CredentialStore};
pub use json_file::JsonFile;
pub use notes::NoteStore;
pub use snapshots::{Snapshot, SnapshotStore};

/// Errors from persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
