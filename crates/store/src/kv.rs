//! Key-value store backends.
//!
//! The store interface is string-keyed and string-valued: `bestScore` holds a
//! plain integer string, `leaderboard` a JSON array. Callers treat values as
//! opaque; interpretation lives in [`crate::profile`] and
//! [`crate::leaderboard`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Minimal get/set interface the persistence worker runs against.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object of string keys to string values,
/// rewritten in full on every set. The per-device analogue of the host's
/// key-value storage.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing or unreadable file, or one holding
    /// malformed JSON, yields an empty store - persisted state is never worth
    /// refusing to start over.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = Self::read_map(&path).unwrap_or_default();
        Self { path, map }
    }

    fn read_map(path: &Path) -> Option<HashMap<String, String>> {
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn write_map(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.map)?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating store directory {}", dir.display()))?;
            }
        }
        fs::write(&self.path, raw)
            .with_context(|| format!("writing store file {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        self.write_map()
    }
}
