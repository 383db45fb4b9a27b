//! WASM module: the session core wired to real browser capabilities
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          EduSession (JS API)             │
//! │  connect, disconnect, toggleTheme, ...   │
//! └──────────────┬───────────────────────────┘
//!                │
//! ┌──────────────▼───────────────────────────┐
//! │   Session (WalletManager + ThemeStore)   │
//! └───┬──────────────┬───────────────┬───────┘
//!     │              │               │
//! LocalStorage   EthereumSource   BrowserDocument
//! (localStorage) (window.ethereum) (<html> classList)
//! ```

mod document;
mod ethereum;
mod session;
mod storage;

pub use document::BrowserDocument;
pub use ethereum::{EthereumProvider, EthereumSource};
pub use session::EduSession;
pub use storage::LocalStorage;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;

/// Best-effort message out of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
