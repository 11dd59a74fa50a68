//! User preferences.
//!
//! [`PreferenceSet`] holds the durable settings (table density, auto-refresh
//! toggle and cadence, remember-view flag). [`PreferencesStore`] owns one set,
//! loads it once from storage and writes the whole set back on every update.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use align_dash::preferences::{PreferenceUpdate, PreferencesStore, TableDensity};
//! use align_dash::storage::MemoryStorage;
//!
//! let store = PreferencesStore::new(Arc::new(MemoryStorage::new()), "align-academy-preferences");
//! store.load();
//! store.update_preference(PreferenceUpdate::TableDensity(TableDensity::Compact)).unwrap();
//! assert_eq!(store.preferences().table_density, TableDensity::Compact);
//! ```

mod schema;
mod store;

pub use schema::{PreferenceKey, PreferenceSet, PreferenceUpdate, TableDensity};
pub use store::{ListenerId, PreferenceListener, PreferencesStore};
