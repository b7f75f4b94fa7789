//! Key-value persistence backend
//!
//! The original host kept every collection under a fixed string key in
//! the browser's localStorage. This backend keeps the same layout on
//! disk: one file per key inside a single data directory, each JSON
//! collection serialized whole on every change. There is no partial
//! write and no cross-instance synchronization.
//!
//! Storage keys (verbatim from the original layout):
//! - prompt-manager-data - prompts
//! - prompt-manager-categories - prompt categories
//! - ai-browser-link-categories - AI link categories
//! - ai-browser-links - AI links
//! - ai-prompt-manager-scratchpad - scratch note (raw string)
//! - prompt-manager-bg - background theme token (raw string)

use std::{fs, path::PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{DeckError, Result};

pub mod ai_links;
pub mod categories;
pub mod preferences;
pub mod prompts;

pub const KEY_PROMPTS: &str = "prompt-manager-data";
pub const KEY_CATEGORIES: &str = "prompt-manager-categories";
pub const KEY_AI_LINK_CATEGORIES: &str = "ai-browser-link-categories";
pub const KEY_AI_LINKS: &str = "ai-browser-links";
pub const KEY_SCRATCHPAD: &str = "ai-prompt-manager-scratchpad";
pub const KEY_BACKGROUND: &str = "prompt-manager-bg";

/// File-backed key-value store, one entry per fixed key
///
/// Cheap to clone; every store holds its own handle.
#[derive(Debug, Clone)]
pub struct Db {
    dir: PathBuf,
}

impl Db {
    /// Open (and create if missing) a storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| DeckError::StorageError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Open the platform-default storage directory
    /// (e.g. ~/.local/share/promptdeck on Linux)
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| DeckError::StorageError("Could not determine data directory".into()))?;
        Self::open(base.join("promptdeck"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read the raw string stored under `key`, if any
    pub fn get_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    /// Write a raw string under `key`
    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    /// Read and deserialize the JSON value stored under `key`
    ///
    /// Returns None when the key is absent. A present-but-corrupt entry
    /// is an Err so callers can fall back to seed data.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key) {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write a JSON value under `key`
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, &json)
    }
}

/// Write a collection under `key`, best-effort
///
/// In-memory state always reflects the mutation; a failed write only
/// means the change will not survive a restart. One consistent policy
/// for every collection: log a warning and carry on.
pub(crate) fn persist<T: Serialize>(db: &Db, key: &str, value: &T) {
    if let Err(e) = db.put_json(key, value) {
        tracing::warn!(key, error = %e, "failed to persist collection");
    }
}

/// Current time as epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh opaque id for a new record
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_raw_round_trip() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();

        assert!(db.get_raw(KEY_SCRATCHPAD).is_none());
        db.put_raw(KEY_SCRATCHPAD, "note text").unwrap();
        assert_eq!(db.get_raw(KEY_SCRATCHPAD).as_deref(), Some("note text"));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();

        let values = vec!["a".to_string(), "b".to_string()];
        db.put_json("test-key", &values).unwrap();

        let loaded: Option<Vec<String>> = db.get_json("test-key").unwrap();
        assert_eq!(loaded, Some(values));
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();

        let loaded: Option<Vec<String>> = db.get_json("absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_entry_is_err() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();

        db.put_raw(KEY_PROMPTS, "not json at all").unwrap();
        let loaded: Result<Option<Vec<String>>> = db.get_json(KEY_PROMPTS);
        assert!(loaded.is_err());
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deep").join("storage");
        let db = Db::open(&nested).unwrap();
        assert!(nested.exists());
        db.put_raw("k", "v").unwrap();
        assert_eq!(db.get_raw("k").as_deref(), Some("v"));
    }
}
