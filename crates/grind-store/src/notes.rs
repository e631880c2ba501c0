#![forbid(unsafe_code)]

//! Per-problem notes.
//!
//! Notes are plain markdown files, one per problem, so the external editor
//! can open them directly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::StoreResult;

/// Stores one note file per problem under `state_dir/notes/`.
#[derive(Debug, Clone)]
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    /// Store rooted at `state_dir/notes/`.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            dir: state_dir.join("notes"),
        }
    }

    /// Path of the note file for a problem.
    #[must_use]
    pub fn path(&self, problem_id: u64) -> PathBuf {
        self.dir.join(format!("{problem_id}.md"))
    }

    /// Read a note; a missing file is the empty note.
    pub fn read(&self, problem_id: u64) -> StoreResult<String> {
        match fs::read_to_string(self.path(problem_id)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a note, creating the notes directory on first use.
    pub fn write(&self, problem_id: u64, text: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(problem_id), text)?;
        Ok(())
    }
}
