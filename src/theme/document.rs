//! Document marker synchronisation (consumer side)
//!
//! The store never touches the document. `ThemeSync` is the effect a view
//! mounts: apply once at mount, then once per change, skipping re-applies
//! of the value already on the document.

use super::{Subscription, Theme, ThemeStore};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Root element carrying the theme marker (a class on `<html>` in browsers).
pub trait DocumentRoot {
    fn remove_marker(&self, marker: &str);
    fn add_marker(&self, marker: &str);
}

/// Clear every theme marker, then add the one for `theme`.
pub fn apply_theme(document: &dyn DocumentRoot, theme: Theme) {
    for marker in Theme::ALL {
        document.remove_marker(marker.as_str());
    }
    document.add_marker(theme.as_str());
}

/// In-memory class list. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    classes: Rc<RefCell<BTreeSet<String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.classes.borrow().contains(marker)
    }

    pub fn markers(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    /// The theme currently marked, if exactly one theme marker is present.
    pub fn theme(&self) -> Option<Theme> {
        let mut marked = Theme::ALL.into_iter().filter(|t| self.has_marker(t.as_str()));
        match (marked.next(), marked.next()) {
            (Some(theme), None) => Some(theme),
            _ => None,
        }
    }

    /// Number of `add_marker` calls seen.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl DocumentRoot for MemoryDocument {
    fn remove_marker(&self, marker: &str) {
        self.classes.borrow_mut().remove(marker);
    }

    fn add_marker(&self, marker: &str) {
        self.writes.set(self.writes.get() + 1);
        self.classes.borrow_mut().insert(marker.to_string());
    }
}

/// Keeps a document's theme marker in step with a [`ThemeStore`].
///
/// Unsubscribes on drop; hold it for as long as the view is mounted.
pub struct ThemeSync {
    store: ThemeStore,
    subscription: Cell<Option<Subscription>>,
    applied: Rc<Cell<Option<Theme>>>,
    document: Rc<dyn DocumentRoot>,
}

impl ThemeSync {
    pub fn mount(store: &ThemeStore, document: Rc<dyn DocumentRoot>) -> Self {
        let applied = Rc::new(Cell::new(None));
        apply_once(&*document, &applied, store.theme());

        let subscription = {
            let document = document.clone();
            let applied = applied.clone();
            store.subscribe(move |theme| apply_once(&*document, &applied, theme))
        };

        Self {
            store: store.clone(),
            subscription: Cell::new(Some(subscription)),
            applied,
            document,
        }
    }

    /// Re-run the effect for the store's current value (a re-render).
    /// No-op when that value is already applied.
    pub fn refresh(&self) {
        apply_once(&*self.document, &self.applied, self.store.theme());
    }

    pub fn applied(&self) -> Option<Theme> {
        self.applied.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.get().is_some()
    }

    /// Stop following the store. Idempotent.
    pub fn unmount(&self) {
        if let Some(subscription) = self.subscription.take() {
            self.store.unsubscribe(subscription);
        }
    }
}

impl Drop for ThemeSync {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn apply_once(document: &dyn DocumentRoot, applied: &Cell<Option<Theme>>, theme: Theme) {
    if applied.get() == Some(theme) {
        return;
    }
    apply_theme(document, theme);
    applied.set(Some(theme));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DurableStorage, MemoryStorage, THEME_KEY};

    fn setup() -> (MemoryStorage, ThemeStore, MemoryDocument) {
        let storage = MemoryStorage::new();
        let store = ThemeStore::new(Rc::new(storage.clone()));
        (storage, store, MemoryDocument::new())
    }

    #[test]
    fn mount_applies_current_theme() {
        let (_, store, document) = setup();
        let sync = ThemeSync::mount(&store, Rc::new(document.clone()));

        assert_eq!(document.theme(), Some(Theme::Light));
        assert_eq!(sync.applied(), Some(Theme::Light));
        assert_eq!(document.writes(), 1);
    }

    #[test]
    fn toggle_converges_all_three_views() {
        let (storage, store, document) = setup();
        let _sync = ThemeSync::mount(&store, Rc::new(document.clone()));

        for _ in 0..3 {
            let theme = store.toggle_theme();
            assert_eq!(store.theme(), theme);
            assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some(theme.as_str()));
            assert_eq!(document.theme(), Some(theme));
        }
    }

    #[test]
    fn refresh_skips_redundant_apply() {
        let (_, store, document) = setup();
        let sync = ThemeSync::mount(&store, Rc::new(document.clone()));

        sync.refresh();
        sync.refresh();
        assert_eq!(document.writes(), 1);

        store.toggle_theme();
        sync.refresh();
        assert_eq!(document.writes(), 2);
    }

    #[test]
    fn stale_marker_is_replaced() {
        let (_, store, document) = setup();
        document.add_marker("dark");
        document.add_marker("font-large");

        let _sync = ThemeSync::mount(&store, Rc::new(document.clone()));
        assert_eq!(document.markers(), vec!["font-large".to_string(), "light".to_string()]);
    }

    #[test]
    fn unmount_stops_following() {
        let (_, store, document) = setup();
        let sync = ThemeSync::mount(&store, Rc::new(document.clone()));

        sync.unmount();
        sync.unmount();
        assert!(!sync.is_mounted());
        assert_eq!(store.subscriber_count(), 0);

        store.toggle_theme();
        assert_eq!(document.theme(), Some(Theme::Light));
    }

    #[test]
    fn drop_unsubscribes() {
        let (_, store, document) = setup();
        {
            let _sync = ThemeSync::mount(&store, Rc::new(document));
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }
}
