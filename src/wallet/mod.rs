//! Wallet session - which account (if any) is connected
//!
//! # Architecture
//!
//! ```text
//! WalletManager
//!     │
//!     ├── connect()  ──► ProviderSource::detect()
//!     │                      │ None → ConnectError::NoProvider
//!     │                      ▼
//!     │                  WalletProvider::request_accounts().await
//!     │                      │ Err / [] → ConnectError::ProviderFailure
//!     │                      ▼
//!     │                  first account → memory + storage["walletAddress"]
//!     │
//!     ├── restore_session() ◄── storage["walletAddress"] (no provider call)
//!     │
//!     └── disconnect() ──► clear memory + remove key
//! ```
//!
//! A failed connect never touches the existing session. Overlapping connects
//! are last-resolved-wins: each success commits when it resolves.

mod address;
mod manager;
pub mod provider;

pub use address::{is_account_address, short_address, ELLIPSIS};
pub use manager::{ConnectError, WalletManager, WalletSession};
pub use provider::{Installed, NoWallet, ProviderError, ProviderSource, StaticWallet, WalletProvider};
