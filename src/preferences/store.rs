//! Persistent preference store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::Result;
use crate::storage::{read_json, write_json, Storage};

use super::{PreferenceSet, PreferenceUpdate};

/// Identifies a subscription made with [`PreferencesStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked with the current preferences after every change.
pub type PreferenceListener = Arc<dyn Fn(&PreferenceSet) + Send + Sync>;

/// Holds the [`PreferenceSet`] and mirrors it into storage.
///
/// The store starts with defaults and is not loaded. [`load`](Self::load)
/// merges the persisted blob exactly once; until then writes to storage are
/// skipped so the defaults never overwrite what a previous session saved.
pub struct PreferencesStore {
    storage: Arc<dyn Storage>,
    key: String,
    state: RwLock<PreferenceSet>,
    loaded: AtomicBool,
    listeners: Mutex<Vec<(ListenerId, PreferenceListener)>>,
    next_listener: AtomicU64,
}

impl PreferencesStore {
    /// Create a store persisting under `key`.
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            state: RwLock::new(PreferenceSet::default()),
            loaded: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Get the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Merge persisted preferences over the defaults.
    ///
    /// Only the first call reads storage. Absent, unreadable or malformed
    /// data leaves the defaults in place.
    pub fn load(&self) -> PreferenceSet {
        let merged = {
            let mut state = self.write_state();
            if self.loaded.load(Ordering::SeqCst) {
                tracing::debug!("Preferences already loaded");
                return state.clone();
            }

            let merged = match read_json(self.storage.as_ref(), &self.key) {
                Some(value) => PreferenceSet::merged_over_defaults(&value).unwrap_or_else(|| {
                    tracing::warn!("Persisted preferences are not an object, using defaults");
                    PreferenceSet::default()
                }),
                None => PreferenceSet::default(),
            };

            *state = merged.clone();
            self.loaded.store(true, Ordering::SeqCst);
            merged
        };
        tracing::debug!("Loaded preferences: {:?}", merged);

        self.notify(&merged);
        merged
    }

    /// Check whether the persisted value has been merged in.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// Snapshot of the current preferences.
    pub fn preferences(&self) -> PreferenceSet {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace one field and persist the whole set.
    ///
    /// Invalid values are rejected before anything changes. Persistence
    /// failures are logged; the new value still applies for this session.
    pub fn update_preference(&self, update: PreferenceUpdate) -> Result<()> {
        let snapshot = {
            let mut state = self.write_state();
            state.apply(update)?;
            state.clone()
        };
        tracing::debug!("Updated preference {}", update.key());

        self.persist_logged(&snapshot);
        self.notify(&snapshot);
        Ok(())
    }

    /// Restore every preference to its default.
    pub fn reset(&self) {
        let defaults = PreferenceSet::default();
        *self.write_state() = defaults.clone();
        self.persist_logged(&defaults);
        self.notify(&defaults);
    }

    /// Write the current preferences to storage now.
    ///
    /// Unlike updates, this reports the storage error to the caller. It is a
    /// no-op before [`load`](Self::load).
    pub fn flush(&self) -> Result<()> {
        if !self.is_loaded() {
            tracing::debug!("Skipping preference flush before load");
            return Ok(());
        }
        write_json(self.storage.as_ref(), &self.key, &self.preferences())
    }

    /// Register a callback run after every load, update and reset.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&PreferenceSet) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        self.lock_listeners().push((id, Arc::new(listener)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Number of registered callbacks.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    fn persist_logged(&self, prefs: &PreferenceSet) {
        if !self.is_loaded() {
            tracing::debug!("Preferences not loaded yet, keeping change in memory only");
            return;
        }
        if let Err(e) = write_json(self.storage.as_ref(), &self.key, prefs) {
            tracing::warn!("Failed to persist preferences: {}", e);
        }
    }

    fn notify(&self, prefs: &PreferenceSet) {
        // Listeners may call back into the store, so none of its locks are held.
        let listeners: Vec<PreferenceListener> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(prefs);
        }
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, PreferenceSet> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<(ListenerId, PreferenceListener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for PreferencesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesStore")
            .field("key", &self.key)
            .field("state", &self.preferences())
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}
