//! Key/value persistence for dashboard state.
//!
//! Every store persists through the [`Storage`] trait: string keys mapped to
//! JSON strings, the same shape browser local storage offers. Two backends
//! ship with the crate:
//!
//! - [`MemoryStorage`] keeps everything in process, with optional quota and
//!   availability switches for exercising failure paths
//! - [`FileStorage`] keeps one file per key under a data directory
//!
//! # Keys
//!
//! Each store owns its own key. Preferences and navigation lists used to
//! share a single key with incompatible shapes; they are now split into
//! [`StorageKeys::preferences`] and [`StorageKeys::navigation`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;

use crate::error::{DashError, Result};

/// Default prefix for storage keys.
pub const DEFAULT_NAMESPACE: &str = "align-academy";

/// Prefix for per-table view state keys.
pub const TABLE_VIEW_PREFIX: &str = "table-view-";

/// A string-keyed, string-valued persistent store.
///
/// Implementations use interior mutability so a single backend can be shared
/// by every store of a dashboard.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// List stored keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// The storage keys used by one dashboard instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    /// Create keys under the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key holding the preference set.
    pub fn preferences(&self) -> String {
        format!("{}-preferences", self.namespace)
    }

    /// Key holding recent items, favorites and quick links.
    pub fn navigation(&self) -> String {
        format!("{}-navigation", self.namespace)
    }

    /// Key holding one table's view state.
    pub fn table_view(&self, table_id: &str) -> String {
        table_view_key(table_id)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Derive the storage key for a table's view state.
pub fn table_view_key(table_id: &str) -> String {
    format!("{}{}", TABLE_VIEW_PREFIX, table_id)
}

/// Read and parse the JSON value stored under `key`.
///
/// Absent keys, unreadable storage and malformed JSON all yield `None`; the
/// failures are logged.
pub(crate) fn read_json(storage: &dyn Storage, key: &str) -> Option<serde_json::Value> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read '{}' from storage: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed JSON under '{}': {}", key, e);
            None
        }
    }
}

/// Serialize `value` and store it under `key`.
pub(crate) fn write_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|e| DashError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    storage.set_item(key, &json)
}
