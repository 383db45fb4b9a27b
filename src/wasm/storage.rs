//! `window.localStorage` as durable storage

use super::js_message;
use crate::storage::{DurableStorage, StorageError, StorageResult};

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Fails when there is no window or the origin blocks storage
    /// (private mode, sandboxed iframe).
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { inner })
    }
}

impl DurableStorage for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Other(format!("localStorage get: {}", js_message(&e))))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        // Throws QuotaExceededError when full
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Other(format!("localStorage set: {}", js_message(&e))))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Other(format!("localStorage remove: {}", js_message(&e))))
    }
}
