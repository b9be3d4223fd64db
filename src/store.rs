//! Narrow key-value persistence seam
//!
//! Controller-level code never touches files directly; it goes through
//! [`KeyValueStore`] so the backing mechanism is swappable. Two keys exist
//! today: `theme` (raw mode string) and `history` (JSON array). Reads are
//! lenient by contract: anything unreadable is simply absent. Writes report
//! [`ClearThinkError::Storage`] and the caller degrades to in-memory
//! behavior.
//!
//! Concurrent processes writing the same key race last-write-wins; no
//! locking is provided.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{ClearThinkError, Result};

/// Persisted string-per-key storage.
pub trait KeyValueStore: Send {
    /// Read a key; missing or unreadable values are `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a key, creating the backing location if needed.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under a root directory.
///
/// The default root is `<config_dir>/clearthink/state/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Platform state directory, `None` when no config dir exists (rare,
    /// e.g. stripped-down containers).
    pub fn default_root() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clearthink").join("state"))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| ClearThinkError::Storage {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        fs::write(self.path_for(key), value).map_err(|e| ClearThinkError::Storage {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory store for tests and for degraded operation when no state
/// directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, simulating a full or read-only
    /// backing store.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Seed a value directly, bypassing the write-failure switch.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(ClearThinkError::Storage {
                key: key.to_string(),
                reason: "write disabled".to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.get("theme"), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("a").join("b"));
        store.set("history", "[]").unwrap();
        assert_eq!(store.get("history").as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_overwrite_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.set("theme", "light").unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_memory_store_write_failure_is_storage_error() {
        let mut store = MemoryStore::new();
        store.fail_writes(true);
        let err = store.set("history", "[]").unwrap_err();
        assert_eq!(err.code(), "CT-020");
    }

    #[test]
    fn test_memory_store_seed_survives_write_failure_mode() {
        let mut store = MemoryStore::new();
        store.fail_writes(true);
        store.seed("theme", "dark");
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }
}
