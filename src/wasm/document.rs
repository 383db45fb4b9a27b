//! `<html>` class list as the theme marker target

use super::{js_message, log};
use crate::theme::DocumentRoot;

pub struct BrowserDocument {
    root: web_sys::Element,
}

impl BrowserDocument {
    /// `document.documentElement`, if there is a document.
    pub fn root() -> Option<Self> {
        let root = web_sys::window()?.document()?.document_element()?;
        Some(Self { root })
    }
}

impl DocumentRoot for BrowserDocument {
    fn remove_marker(&self, marker: &str) {
        if let Err(e) = self.root.class_list().remove_1(marker) {
            log!("[theme] classList.remove({}) failed: {}", marker, js_message(&e));
        }
    }

    fn add_marker(&self, marker: &str) {
        if let Err(e) = self.root.class_list().add_1(marker) {
            log!("[theme] classList.add({}) failed: {}", marker, js_message(&e));
        }
    }
}
