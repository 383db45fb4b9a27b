//! Durable storage - synchronous key → string store
//!
//! Both managers persist through the same store under distinct keys.
//! Values are plain strings; no transaction spans the two keys.
//!
//! | Backend | Platform | Scope |
//! |---------|----------|-------|
//! | `MemoryStorage` | any | process (tests, ephemeral sessions) |
//! | `FileStorage` | native | `$EDUCHAIN_ROOT/<app>/data/storage.json` |
//! | `LocalStorage` | wasm | browser origin (`window.localStorage`) |

#[cfg(feature = "native")]
pub(crate) mod file;

#[cfg(feature = "native")]
pub use file::FileStorage;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Key holding the connected wallet address.
pub const WALLET_ADDRESS_KEY: &str = "walletAddress";
/// Key holding the theme preference (`"light"` / `"dark"`).
pub const THEME_KEY: &str = "theme";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Synchronous key → string store, persistent for the backend's scope.
///
/// Methods take `&self`: backends own their interior mutability, the way
/// the browser's `localStorage` is shared by every reader on the page.
pub trait DurableStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Shared handle used by the managers.
pub type SharedStorage = Rc<dyn DurableStorage>;

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-memory storage. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(THEME_KEY).unwrap(), None);

        storage.set(THEME_KEY, "dark").unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        storage.remove(THEME_KEY).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set(WALLET_ADDRESS_KEY, "0xabc").unwrap();
        assert_eq!(b.get(WALLET_ADDRESS_KEY).unwrap().as_deref(), Some("0xabc"));
    }

    #[test]
    fn keys_are_distinct() {
        let storage = MemoryStorage::new();
        storage.set(WALLET_ADDRESS_KEY, "0xabc").unwrap();
        storage.set(THEME_KEY, "light").unwrap();
        storage.remove(THEME_KEY).unwrap();
        assert_eq!(storage.len(), 1);
        assert!(storage.get(WALLET_ADDRESS_KEY).unwrap().is_some());
    }
}
