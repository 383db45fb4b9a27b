//! File-backed storage for native sessions.
//!
//! One JSON object per app at `<root>/<app>/data/storage.json`; the whole
//! object is rewritten on every mutation.

use super::{DurableStorage, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Overrides the data root (defaults to the platform local data dir).
pub const ROOT_ENV: &str = "EDUCHAIN_ROOT";

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file for `app`, resolving the root from `EDUCHAIN_ROOT`.
    pub fn open(app: &str) -> StorageResult<Self> {
        Self::open_at(storage_path(app))
    }

    /// Open (or lazily create) the storage file at an explicit path.
    pub fn open_at(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "storage opened");
        Ok(Self { path, entries: RefCell::new(entries) })
    }

    /// Storage at `path` with no entries, whatever the file holds now.
    /// The first write replaces the file.
    pub fn empty_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), entries: RefCell::new(BTreeMap::new()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        if !self.entries.borrow().contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.borrow().clone();
        next.remove(key);
        self.flush(&next)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}

/// Resolve `<root>/<app>/data/storage.json`.
pub fn storage_path(app: &str) -> PathBuf {
    data_root().join(app).join("data").join("storage.json")
}

fn data_root() -> PathBuf {
    std::env::var(ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")))
}
