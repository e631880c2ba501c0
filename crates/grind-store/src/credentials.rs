#![forbid(unsafe_code)]

//! Session credential storage.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::StoreResult;
use crate::json_file::JsonFile;

/// Session cookie pair captured at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub session: String,
    pub csrf: String,
}

/// Stores the session credentials for the active account.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    file: JsonFile<Option<Credentials>>,
}

impl CredentialStore {
    /// Store rooted at `state_dir/credentials.json`.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(state_dir.join("credentials.json")),
        }
    }

    /// The stored credentials, if any.
    #[must_use]
    pub fn get(&self) -> Option<Credentials> {
        self.file.load()
    }

    /// Replace the stored credentials.
    pub fn set(&self, credentials: &Credentials) -> StoreResult<()> {
        self.file.save(&Some(credentials.clone()))
    }

    /// Forget the stored credentials.
    pub fn clear(&self) -> StoreResult<()> {
        self.file.clear()
    }
}
