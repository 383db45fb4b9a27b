use super::address::{is_account_address, short_address};
use super::provider::ProviderSource;
use crate::storage::{SharedStorage, WALLET_ADDRESS_KEY};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Why a connect attempt did not produce an address. Both kinds are
/// recoverable: the caller may retry at any time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// No wallet capability in the environment; the user must install or
    /// enable one.
    #[error("no wallet provider available")]
    NoProvider,
    /// The provider existed but the request did not succeed.
    #[error("wallet provider failed: {0}")]
    ProviderFailure(String),
}

/// Snapshot of the connected identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: Option<String>,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Compact display form of the address, if connected.
    pub fn short_address(&self) -> Option<String> {
        self.address.as_deref().map(short_address)
    }
}

/// Owns the wallet session. Clones share state.
#[derive(Clone)]
pub struct WalletManager {
    session: Rc<RefCell<WalletSession>>,
    storage: SharedStorage,
    source: Rc<dyn ProviderSource>,
    key: Rc<str>,
}

impl WalletManager {
    /// Create the manager and rehydrate any persisted address.
    pub fn new(storage: SharedStorage, source: Rc<dyn ProviderSource>) -> Self {
        Self::with_key(storage, source, WALLET_ADDRESS_KEY)
    }

    pub fn with_key(storage: SharedStorage, source: Rc<dyn ProviderSource>, key: &str) -> Self {
        let manager = Self {
            session: Rc::new(RefCell::new(WalletSession::default())),
            storage,
            source,
            key: Rc::from(key),
        };
        manager.restore_session();
        manager
    }

    pub fn session(&self) -> WalletSession {
        self.session.borrow().clone()
    }

    pub fn address(&self) -> Option<String> {
        self.session.borrow().address.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.session.borrow().is_connected()
    }

    /// Trust-on-read rehydration from storage. The provider is not contacted.
    /// A failed read leaves the current session as it is.
    pub fn restore_session(&self) {
        let stored = match self.storage.get(&self.key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                warn!(key = %self.key, error = %e, "wallet session restore failed");
                return;
            }
        };
        debug!(restored = stored.is_some(), "wallet session restored");
        self.session.borrow_mut().address = stored;
    }

    /// Ask the environment's wallet for account access.
    ///
    /// Suspends until the provider answers. On success the first account is
    /// committed to memory and storage in one step; on failure nothing changes.
    pub async fn connect(&self) -> Result<String, ConnectError> {
        let Some(provider) = self.source.detect() else {
            warn!("connect: no wallet provider available");
            return Err(ConnectError::NoProvider);
        };

        // No borrow of `session` is held across this await.
        let accounts = provider.request_accounts().await.map_err(|e| {
            warn!(error = %e, "connect: provider request failed");
            ConnectError::ProviderFailure(e.to_string())
        })?;

        let address = accounts.into_iter().next().ok_or_else(|| {
            warn!("connect: provider returned no accounts");
            ConnectError::ProviderFailure("no accounts returned".into())
        })?;

        if !is_account_address(&address) {
            warn!(address = %address, "connect: unexpected account identifier shape");
        }

        self.commit(&address);
        info!(address = %short_address(&address), "wallet connected");
        Ok(address)
    }

    /// Forget the connected account in memory and storage. Idempotent.
    pub fn disconnect(&self) {
        let previous = self.session.borrow_mut().address.take();
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "wallet session remove failed");
        }
        if previous.is_some() {
            info!("wallet disconnected");
        }
    }

    fn commit(&self, address: &str) {
        self.session.borrow_mut().address = Some(address.to_string());
        if let Err(e) = self.storage.set(&self.key, address) {
            // In-memory session stands; it just won't survive a reload.
            warn!(key = %self.key, error = %e, "wallet session persist failed");
        }
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager")
            .field("session", &*self.session.borrow())
            .field("key", &self.key)
            .finish()
    }
}
