//! Wallet capability seam
//!
//! `ProviderSource` answers "is a wallet exposed right now?" and hands out a
//! `WalletProvider` when one is. Detection happens on every connect attempt,
//! since browser extensions may inject themselves after page load.

use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;

/// Opaque provider failure (user rejection, internal error, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// An environment-provided wallet that can hand out account identifiers.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Request account access. May suspend until the user answers the
    /// wallet's prompt; resolves to an ordered list of identifiers.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;
}

/// Detects whether a wallet capability is present in the environment.
pub trait ProviderSource {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>>;
}

/// Environment with no wallet installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWallet;

impl ProviderSource for NoWallet {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>> {
        None
    }
}

/// Environment with a fixed, always-present provider.
#[derive(Clone)]
pub struct Installed(Rc<dyn WalletProvider>);

impl Installed {
    pub fn new(provider: impl WalletProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }

    pub fn from_rc(provider: Rc<dyn WalletProvider>) -> Self {
        Self(provider)
    }
}

impl ProviderSource for Installed {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>> {
        Some(self.0.clone())
    }
}

/// Provider with a scripted answer. Used by the CLI (manual address entry)
/// and as a test double.
#[derive(Debug, Clone)]
pub struct StaticWallet {
    response: Result<Vec<String>, ProviderError>,
    calls: Rc<Cell<usize>>,
}

impl StaticWallet {
    pub fn accounts<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            response: Ok(accounts.into_iter().map(Into::into).collect()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            response: Err(ProviderError::new(message)),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Number of account requests served (shared across clones).
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl WalletProvider for StaticWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }
}
