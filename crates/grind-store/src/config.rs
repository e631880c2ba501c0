#![forbid(unsafe_code)]

//! Per-workspace configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::StoreResult;
use crate::json_file::JsonFile;

fn default_lang() -> String {
    "rust".to_string()
}

fn default_api_url() -> String {
    "https://practice.example.com/api".to_string()
}

fn default_page_size() -> u64 {
    50
}

/// Workspace configuration.
///
/// Unknown keys in the file are ignored so older binaries can read configs
/// written by newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor command; falls back to `$VISUAL`/`$EDITOR` when unset.
    #[serde(default)]
    pub editor: Option<String>,
    /// Language used for solution files and run requests.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Base URL of the problem service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Problem-list page size per fetch.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: None,
            lang: default_lang(),
            api_url: default_api_url(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// File extension for solution files in the configured language.
    #[must_use]
    pub fn solution_extension(&self) -> &'static str {
        match self.lang.as_str() {
            "rust" => "rs",
            "python" | "python3" => "py",
            "java" => "java",
            "cpp" | "c++" => "cpp",
            "c" => "c",
            "golang" | "go" => "go",
            "javascript" => "js",
            "typescript" => "ts",
            _ => "txt",
        }
    }
}

/// Stores the config for one workspace directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    file: JsonFile<Config>,
}

impl ConfigStore {
    /// Store rooted at `workspace/config.json`.
    #[must_use]
    pub fn new(workspace: &Path) -> Self {
        Self {
            file: JsonFile::new(workspace.join("config.json")),
        }
    }

    /// Load the config, defaulting any missing or unreadable field.
    #[must_use]
    pub fn get(&self) -> Config {
        self.file.load()
    }

    /// Persist the config.
    pub fn set(&self, config: &Config) -> StoreResult<()> {
        self.file.save(config)
    }

    /// The config file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Default workspace directory: `$GRIND_HOME`, else `~/.grind`.
#[must_use]
pub fn default_workspace() -> PathBuf {
    if let Ok(dir) = std::env::var("GRIND_HOME") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".grind")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::default();
        assert_eq!(config.lang, "rust");
        assert_eq!(config.page_size, 50);
        assert!(config.editor.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"lang": "python3"}"#).unwrap();
        let config = ConfigStore::new(dir.path()).get();
        assert_eq!(config.lang, "python3");
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let mut config = Config::default();
        config.editor = Some("hx".into());
        store.set(&config).unwrap();
        assert_eq!(store.get(), config);
    }

    #[test]
    fn solution_extensions() {
        let mut config = Config::default();
        assert_eq!(config.solution_extension(), "rs");
        config.lang = "python3".into();
        assert_eq!(config.solution_extension(), "py");
        config.lang = "cobol".into();
        assert_eq!(config.solution_extension(), "txt");
    }
}
