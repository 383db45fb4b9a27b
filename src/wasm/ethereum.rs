//! Injected EIP-1193 wallet (`window.ethereum`)

use super::js_message;
use crate::wallet::{ProviderError, ProviderSource, WalletProvider};
use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

/// Looks up `window.ethereum` at every detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumSource;

impl ProviderSource for EthereumSource {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Rc::new(EthereumProvider { ethereum }))
    }
}

pub struct EthereumProvider {
    ethereum: JsValue,
}

impl EthereumProvider {
    fn request_fn(&self) -> Result<Function, ProviderError> {
        Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(|e| ProviderError::new(js_message(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| ProviderError::new("ethereum.request is not a function"))
    }
}

#[async_trait(?Send)]
impl WalletProvider for EthereumProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let request = self.request_fn()?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(REQUEST_ACCOUNTS))
            .map_err(|e| ProviderError::new(js_message(&e)))?;

        let promise: Promise = request
            .call1(&self.ethereum, &args)
            .map_err(|e| ProviderError::new(js_message(&e)))?
            .dyn_into()
            .map_err(|_| ProviderError::new("ethereum.request did not return a promise"))?;

        // Suspends until the user answers the wallet prompt
        let accounts = JsFuture::from(promise)
            .await
            .map_err(|e| ProviderError::new(js_message(&e)))?;

        serde_wasm_bindgen::from_value(accounts)
            .map_err(|e| ProviderError::new(format!("unexpected accounts payload: {}", e)))
    }
}
