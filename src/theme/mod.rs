//! Theme preference - light/dark, persisted and observed
//!
//! `ThemeStore` is the single source of truth. `toggle_theme()` flips the
//! value, persists it under `"theme"` and fans out to every subscriber in
//! one synchronous step. The document marker is a consumer concern; see
//! [`ThemeSync`].

mod document;

pub use document::{apply_theme, DocumentRoot, MemoryDocument, ThemeSync};

use crate::storage::{SharedStorage, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Every marker a document may carry.
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(u64);

type Callback = Rc<dyn Fn(Theme)>;

struct ThemeState {
    theme: Theme,
    next_id: u64,
    subscribers: BTreeMap<Subscription, Callback>,
}

/// Owns the theme preference. Clones share state and subscribers.
#[derive(Clone)]
pub struct ThemeStore {
    state: Rc<RefCell<ThemeState>>,
    storage: SharedStorage,
    key: Rc<str>,
}

impl ThemeStore {
    /// Create the store, initialised from storage or `Theme::Light`.
    pub fn new(storage: SharedStorage) -> Self {
        Self::with_key(storage, THEME_KEY)
    }

    pub fn with_key(storage: SharedStorage, key: &str) -> Self {
        let theme = load_theme(&*storage, key);
        debug!(theme = %theme, "theme store initialised");
        Self {
            state: Rc::new(RefCell::new(ThemeState {
                theme,
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
            storage,
            key: Rc::from(key),
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    /// Flip light ↔ dark, persist, then notify every subscriber before
    /// returning the new value.
    pub fn toggle_theme(&self) -> Theme {
        let next = {
            let mut state = self.state.borrow_mut();
            state.theme = state.theme.toggled();
            state.theme
        };

        if let Err(e) = self.storage.set(&self.key, next.as_str()) {
            warn!(key = %self.key, error = %e, "theme persist failed");
        }

        // Snapshot so callbacks may subscribe/unsubscribe while we iterate.
        let callbacks: Vec<Callback> = self.state.borrow().subscribers.values().cloned().collect();
        for callback in &callbacks {
            callback(next);
        }

        info!(theme = %next, subscribers = callbacks.len(), "theme toggled");
        next
    }

    /// Register a callback invoked with the new theme after every toggle.
    pub fn subscribe(&self, callback: impl Fn(Theme) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = Subscription(state.next_id);
        state.next_id += 1;
        state.subscribers.insert(id, Rc::new(callback));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.state.borrow_mut().subscribers.remove(&subscription).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemeStore")
            .field("theme", &state.theme)
            .field("subscribers", &state.subscribers.len())
            .field("key", &self.key)
            .finish()
    }
}

/// Read the persisted theme. A stored value that is not the canonical
/// literal (unknown, or differently cased) is rewritten so storage agrees
/// with memory from load onwards.
fn load_theme(storage: &dyn crate::storage::DurableStorage, key: &str) -> Theme {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Theme::default(),
        Err(e) => {
            warn!(key, error = %e, "theme load failed, using default");
            return Theme::default();
        }
    };

    let theme = Theme::from_str(&raw).unwrap_or_else(|| {
        warn!(key, value = %raw, "unknown persisted theme, using default");
        Theme::default()
    });
    if raw != theme.as_str() {
        if let Err(e) = storage.set(key, theme.as_str()) {
            warn!(key, error = %e, "theme rewrite failed");
        }
    }
    theme
}
