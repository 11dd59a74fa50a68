//! Persistent navigation store.

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::{read_json, write_json, Storage};

use super::{FavoriteItem, NavLink, NavigationLimits, NavigationState, QuickLink, RecentItem};

/// Holds recent items, favorites and quick links and mirrors them into storage.
///
/// Like the preferences store, nothing is written until [`load`](Self::load)
/// has run, so a fresh session cannot overwrite saved lists with defaults.
pub struct NavigationStore {
    storage: Arc<dyn Storage>,
    key: String,
    clock: Arc<dyn Clock>,
    limits: NavigationLimits,
    state: RwLock<NavigationState>,
    loaded: AtomicBool,
}

impl NavigationStore {
    /// Create a store persisting under `key` with default limits.
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            clock: Arc::new(SystemClock),
            limits: NavigationLimits::default(),
            state: RwLock::new(NavigationState::default()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Stamp recent items with `clock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use custom list capacities.
    pub fn with_limits(mut self, limits: NavigationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the list capacities.
    pub fn limits(&self) -> NavigationLimits {
        self.limits
    }

    /// Read the persisted lists, once.
    ///
    /// Missing lists take their defaults (new users get the starter quick
    /// links); malformed data is logged and replaced by defaults. Lists that
    /// break the uniqueness or capacity rules are repaired.
    pub fn load(&self) -> NavigationState {
        let mut current = self.write_state();
        if self.loaded.load(Ordering::SeqCst) {
            tracing::debug!("Navigation lists already loaded");
            return current.clone();
        }

        let mut state = NavigationState::default();
        match read_json(self.storage.as_ref(), &self.key) {
            Some(serde_json::Value::Object(obj)) => {
                if let Some(recent) = list_field(&obj, "recentItems") {
                    state.recent_items = recent;
                }
                if let Some(favorites) = list_field(&obj, "favorites") {
                    state.favorites = favorites;
                }
                if let Some(quick_links) = list_field(&obj, "quickLinks") {
                    state.quick_links = quick_links;
                }
            }
            Some(_) => tracing::warn!("Persisted navigation lists are not an object, using defaults"),
            None => {}
        }
        state.normalize(self.limits);

        *current = state.clone();
        self.loaded.store(true, Ordering::SeqCst);
        tracing::debug!(
            "Loaded {} recent items, {} favorites, {} quick links",
            state.recent_items.len(),
            state.favorites.len(),
            state.quick_links.len()
        );
        state
    }

    /// Check whether the persisted lists have been read.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// Snapshot of all three lists.
    pub fn state(&self) -> NavigationState {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Recent items, most recent first.
    pub fn recent_items(&self) -> Vec<RecentItem> {
        self.state().recent_items
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> Vec<FavoriteItem> {
        self.state().favorites
    }

    /// Quick links in insertion order.
    pub fn quick_links(&self) -> Vec<QuickLink> {
        self.state().quick_links
    }

    /// Record a visit to `href`, moving it to the front of the recent list.
    ///
    /// The stamp is the clock reading, bumped past the current head when the
    /// clock repeats or steps back, so stamps stay strictly descending.
    pub fn add_recent_item(&self, href: &str, label: &str) {
        let now = self.clock.now_millis();
        self.mutate(|state| {
            let timestamp = match state.recent_items.first() {
                Some(head) => now.max(head.timestamp + 1),
                None => now,
            };
            let item = RecentItem {
                href: href.to_string(),
                label: label.to_string(),
                timestamp,
            };
            state.add_recent_item(item, self.limits.recent_items)
        });
    }

    /// Forget every recent item.
    pub fn clear_recent_items(&self) {
        self.mutate(|state| state.recent_items.clear());
    }

    /// Add or remove `href` from favorites. Returns whether it is now a favorite.
    pub fn toggle_favorite(&self, href: &str, label: &str) -> bool {
        self.mutate(|state| state.toggle_favorite(NavLink::new(href, label)))
    }

    /// Check whether `href` is a favorite.
    pub fn is_favorite(&self, href: &str) -> bool {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_favorite(href)
    }

    /// Add a quick link. Duplicates and additions past the cap are ignored.
    pub fn add_quick_link(&self, href: &str, label: &str) -> bool {
        let added = self.mutate_if(|state| {
            state.add_quick_link(NavLink::new(href, label), self.limits.quick_links)
        });
        if !added {
            tracing::debug!("Quick link '{}' not added (duplicate or list full)", href);
        }
        added
    }

    /// Remove the quick link for `href`. Returns whether one was removed.
    pub fn remove_quick_link(&self, href: &str) -> bool {
        self.mutate_if(|state| state.remove_quick_link(href))
    }

    /// Write the current lists to storage now.
    ///
    /// Unlike mutations, this reports the storage error to the caller. It is
    /// a no-op before [`load`](Self::load).
    pub fn flush(&self) -> Result<()> {
        if !self.is_loaded() {
            tracing::debug!("Skipping navigation flush before load");
            return Ok(());
        }
        write_json(self.storage.as_ref(), &self.key, &self.state())
    }

    /// Apply a change and persist.
    fn mutate<R>(&self, f: impl FnOnce(&mut NavigationState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.write_state();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.persist(&snapshot);
        result
    }

    /// Apply a change and persist only if it reports that something changed.
    fn mutate_if(&self, f: impl FnOnce(&mut NavigationState) -> bool) -> bool {
        let snapshot = {
            let mut state = self.write_state();
            if !f(&mut state) {
                return false;
            }
            state.clone()
        };
        self.persist(&snapshot);
        true
    }

    fn persist(&self, state: &NavigationState) {
        if !self.is_loaded() {
            tracing::debug!("Navigation lists not loaded yet, keeping change in memory only");
            return;
        }
        if let Err(e) = write_json(self.storage.as_ref(), &self.key, state) {
            tracing::warn!("Failed to persist navigation lists: {}", e);
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, NavigationState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationStore")
            .field("key", &self.key)
            .field("limits", &self.limits)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

fn list_field<T: DeserializeOwned>(
    obj: &serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Option<Vec<T>> {
    let raw = obj.get(name)?;
    match serde_json::from_value(raw.clone()) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::warn!("Ignoring persisted '{}': {}", name, e);
            None
        }
    }
}
