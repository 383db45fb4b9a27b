//! Session - the creation point for both state managers
//!
//! One `Session` per page/process. Consumers receive it (or clones of its
//! managers) by dependency passing; nothing here is global.

use crate::config::SessionConfig;
use crate::storage::{MemoryStorage, SharedStorage};
use crate::theme::ThemeStore;
use crate::wallet::{ProviderSource, WalletManager};
use serde::Serialize;
use std::rc::Rc;

/// Read-only view of both managers, for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub address: Option<String>,
    pub short: Option<String>,
    pub connected: bool,
    pub theme: crate::theme::Theme,
}

#[derive(Clone)]
pub struct Session {
    wallet: WalletManager,
    theme: ThemeStore,
    storage: SharedStorage,
}

impl Session {
    /// Build both managers over `storage` with the default keys.
    pub fn new(storage: SharedStorage, source: Rc<dyn ProviderSource>) -> Self {
        Self::with_config(storage, source, &SessionConfig::default())
    }

    /// Build both managers using the keys from `config`. The storage mode is
    /// the caller's concern: `storage` is used as given.
    pub fn with_config(
        storage: SharedStorage,
        source: Rc<dyn ProviderSource>,
        config: &SessionConfig,
    ) -> Self {
        let wallet = WalletManager::with_key(storage.clone(), source, &config.wallet_key);
        let theme = ThemeStore::with_key(storage.clone(), &config.theme_key);
        tracing::debug!(
            app = %config.app,
            connected = wallet.is_connected(),
            theme = %theme.theme(),
            "session created"
        );
        Self { wallet, theme, storage }
    }

    /// Build storage from `config` (file-backed natively) and both managers.
    #[cfg(feature = "native")]
    pub fn from_config(
        config: &SessionConfig,
        source: Rc<dyn ProviderSource>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        use crate::config::StorageMode;

        let storage: SharedStorage = match config.storage {
            StorageMode::Persistent => open_file_storage(&config.app),
            StorageMode::Memory => Rc::new(MemoryStorage::new()),
        };
        Ok(Self::with_config(storage, source, config))
    }

    /// Session over fresh in-memory storage.
    pub fn in_memory(source: Rc<dyn ProviderSource>) -> Self {
        Self::new(Rc::new(MemoryStorage::new()), source)
    }

    pub fn wallet(&self) -> &WalletManager {
        &self.wallet
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let wallet = self.wallet.session();
        SessionSnapshot {
            short: wallet.short_address(),
            connected: wallet.is_connected(),
            address: wallet.address,
            theme: self.theme.theme(),
        }
    }
}

/// Storage problems never block session creation: a corrupt file is
/// replaced on the next write, an unreadable one degrades to memory.
#[cfg(feature = "native")]
fn open_file_storage(app: &str) -> SharedStorage {
    use crate::storage::{file::storage_path, FileStorage, StorageError};

    match FileStorage::open(app) {
        Ok(storage) => Rc::new(storage),
        Err(StorageError::Format(e)) => {
            let path = storage_path(app);
            tracing::warn!(path = %path.display(), error = %e, "storage file corrupt, starting empty");
            Rc::new(FileStorage::empty_at(path))
        }
        Err(e) => {
            tracing::warn!(app, error = %e, "storage unavailable, state will not survive restarts");
            Rc::new(MemoryStorage::new())
        }
    }
}
