//! EduSession: JS-facing wrapper around `Session`

use super::{log, BrowserDocument, EthereumSource, LocalStorage};
use crate::config::SessionConfig;
use crate::session::Session;
use crate::storage::{MemoryStorage, SharedStorage};
use crate::theme::{Subscription, ThemeSync};
use crate::wallet::{short_address, ConnectError};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct JsConnectError<'a> {
    kind: &'a str,
    message: String,
}

fn connect_error(err: &ConnectError) -> JsValue {
    let kind = match err {
        ConnectError::NoProvider => "NoProvider",
        ConnectError::ProviderFailure(_) => "ProviderFailure",
    };
    let payload = JsConnectError { kind, message: err.to_string() };
    serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
}

/// Browser session: localStorage + window.ethereum + `<html>` theme class.
#[wasm_bindgen]
pub struct EduSession {
    session: Session,
    _sync: Option<ThemeSync>,
    listeners: RefCell<BTreeMap<u32, Subscription>>,
    next_listener: Cell<u32>,
}

impl EduSession {
    fn build(storage: SharedStorage) -> Self {
        let session = Session::with_config(storage, Rc::new(EthereumSource), &SessionConfig::default());
        let sync = BrowserDocument::root().map(|doc| ThemeSync::mount(session.theme(), Rc::new(doc)));
        if sync.is_none() {
            log!("[EduSession] no document root; theme marker not synced");
        }
        Self {
            session,
            _sync: sync,
            listeners: RefCell::new(BTreeMap::new()),
            next_listener: Cell::new(0),
        }
    }
}

#[wasm_bindgen]
impl EduSession {
    /// Session over `localStorage`, or memory if the origin blocks it.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let storage: SharedStorage = match LocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log!("[EduSession] {}; state will not survive reloads", e);
                Rc::new(MemoryStorage::new())
            }
        };
        Self::build(storage)
    }

    /// Session over in-memory storage (tests, previews).
    #[wasm_bindgen(js_name = "inMemory")]
    pub fn in_memory() -> Self {
        Self::build(Rc::new(MemoryStorage::new()))
    }

    /// Request account access. Rejects with `{kind, message}`.
    #[wasm_bindgen]
    pub async fn connect(&self) -> Result<String, JsValue> {
        self.session.wallet().connect().await.map_err(|e| connect_error(&e))
    }

    #[wasm_bindgen]
    pub fn disconnect(&self) {
        self.session.wallet().disconnect();
    }

    #[wasm_bindgen(getter)]
    pub fn address(&self) -> Option<String> {
        self.session.wallet().address()
    }

    #[wasm_bindgen(getter, js_name = "shortAddress")]
    pub fn short_address(&self) -> Option<String> {
        self.session.wallet().session().short_address()
    }

    #[wasm_bindgen(getter, js_name = "isConnected")]
    pub fn is_connected(&self) -> bool {
        self.session.wallet().is_connected()
    }

    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.session.theme().theme().as_str().to_string()
    }

    #[wasm_bindgen(js_name = "toggleTheme")]
    pub fn toggle_theme(&self) -> String {
        self.session.theme().toggle_theme().as_str().to_string()
    }

    /// Call `callback(theme)` after every toggle. Returns a listener id.
    #[wasm_bindgen(js_name = "onThemeChange")]
    pub fn on_theme_change(&self, callback: js_sys::Function) -> u32 {
        let subscription = self.session.theme().subscribe(move |theme| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(theme.as_str())) {
                log!("[EduSession] theme listener threw: {}", super::js_message(&e));
            }
        });
        let id = self.next_listener.get();
        self.next_listener.set(id.wrapping_add(1));
        self.listeners.borrow_mut().insert(id, subscription);
        id
    }

    /// Remove a listener. Unknown or already-removed ids return false.
    #[wasm_bindgen(js_name = "offThemeChange")]
    pub fn off_theme_change(&self, id: u32) -> bool {
        match self.listeners.borrow_mut().remove(&id) {
            Some(subscription) => self.session.theme().unsubscribe(subscription),
            None => false,
        }
    }

    /// `{address, short, connected, theme}`
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for EduSession {
    fn default() -> Self {
        Self::new()
    }
}

/// `0xABCD...EF12`; strings under ten characters come back unchanged.
#[wasm_bindgen(js_name = "shortAddress")]
pub fn short_address_js(address: &str) -> String {
    short_address(address)
}
