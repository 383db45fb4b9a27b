//! EduChain client core: who is signed in, and which theme is showing.
//!
//! # Architecture
//!
//! ```text
//! Session (creation point, one per page/process)
//!   │
//!   ├── WalletManager
//!   │     ├── ProviderSource ──► WalletProvider (window.ethereum, static, none)
//!   │     └── storage["walletAddress"]
//!   │
//!   └── ThemeStore ──► subscribers (sync fan-out)
//!         ├── storage["theme"]
//!         └── ThemeSync ──► DocumentRoot (<html> class: light | dark)
//! ```
//!
//! Both managers are independent: they share only the durable storage
//! backend, under distinct keys.
//!
//! # Operations
//!
//! | Manager | Method | Description |
//! |---------|--------|-------------|
//! | wallet | `session()` | Current `WalletSession` |
//! | wallet | `connect().await` | Request accounts, commit the first |
//! | wallet | `restore_session()` | Rehydrate from storage (no provider call) |
//! | wallet | `disconnect()` | Forget the account |
//! | theme | `theme()` | Current `Theme` |
//! | theme | `toggle_theme()` | Flip, persist, notify |
//! | theme | `subscribe(f)` / `unsubscribe(s)` | Observer registry |
//!
//! # Features
//!
//! - `native` - file-backed storage, logging setup, `educhain` CLI
//! - `wasm` - browser bindings (`localStorage`, `window.ethereum`, `EduSession`)
//!
//! # Usage
//!
//! ```ignore
//! use educhain::{Installed, MemoryStorage, Session, StaticWallet};
//! use std::rc::Rc;
//!
//! let session = Session::new(
//!     Rc::new(MemoryStorage::new()),
//!     Rc::new(Installed::new(StaticWallet::accounts(["0xABCDEF1234567890ABCDEF1234567890ABCDEF12"]))),
//! );
//! let address = session.wallet().connect().await?;
//! assert_eq!(educhain::short_address(&address), "0xABCD...EF12");
//!
//! session.theme().toggle_theme();
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod config;
pub mod session;
pub mod storage;
pub mod theme;
pub mod wallet;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use config::{ConfigError, SessionConfig, StorageMode};
pub use session::{Session, SessionSnapshot};
pub use storage::{DurableStorage, MemoryStorage, SharedStorage, StorageError};
pub use theme::{apply_theme, DocumentRoot, MemoryDocument, Subscription, Theme, ThemeStore, ThemeSync};
pub use wallet::{
    is_account_address, short_address, ConnectError, Installed, NoWallet, ProviderError,
    ProviderSource, StaticWallet, WalletManager, WalletProvider, WalletSession,
};

#[cfg(feature = "native")]
pub use storage::FileStorage;

#[cfg(feature = "wasm")]
pub use wasm::{BrowserDocument, EduSession, EthereumSource, LocalStorage};
