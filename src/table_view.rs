//! Per-table view state.
//!
//! Tables remember their sort, filters and pagination under
//! `table-view-<table id>`. Reads and writes of that key only happen while
//! the `rememberView` preference is on; the in-memory state for the current
//! session always follows the latest save.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::preferences::PreferencesStore;
use crate::storage::{read_json, table_view_key, write_json, Storage};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("unknown sort order: {}", s)),
        }
    }
}

/// Sort, filter and pagination state of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl TableViewState {
    /// Check whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// View state for every table of a dashboard.
pub struct TableViewStore {
    storage: Arc<dyn Storage>,
    preferences: Arc<PreferencesStore>,
    views: Mutex<HashMap<String, TableViewState>>,
}

impl TableViewStore {
    /// Create a store gated by `preferences`.
    pub fn new(storage: Arc<dyn Storage>, preferences: Arc<PreferencesStore>) -> Self {
        Self {
            storage,
            preferences,
            views: Mutex::new(HashMap::new()),
        }
    }

    /// Restore the saved state of `table_id`.
    ///
    /// Yields empty state when `rememberView` is off, nothing is saved, or
    /// the saved blob cannot be parsed.
    pub fn load_view_state(&self, table_id: &str) -> TableViewState {
        let state = if self.preferences.preferences().remember_view {
            let key = table_view_key(table_id);
            read_json(self.storage.as_ref(), &key)
                .and_then(|value| match serde_json::from_value(value) {
                    Ok(state) => Some(state),
                    Err(e) => {
                        tracing::warn!("Ignoring saved view state for '{}': {}", table_id, e);
                        None
                    }
                })
                .unwrap_or_default()
        } else {
            tracing::debug!("Remember view is off, not restoring '{}'", table_id);
            TableViewState::default()
        };

        self.lock().insert(table_id.to_string(), state.clone());
        state
    }

    /// Replace the state of `table_id` and save it when `rememberView` is on.
    ///
    /// Storage failures are logged; the state still applies for this session.
    pub fn save_view_state(&self, table_id: &str, state: TableViewState) {
        if let Err(e) = self.try_save_view_state(table_id, state) {
            tracing::warn!("Failed to save view state for '{}': {}", table_id, e);
        }
    }

    /// Like [`save_view_state`](Self::save_view_state), but reports the
    /// storage error. Returns whether the state was written to storage.
    pub fn try_save_view_state(&self, table_id: &str, state: TableViewState) -> Result<bool> {
        self.lock().insert(table_id.to_string(), state.clone());

        if !self.preferences.is_loaded() {
            tracing::debug!("Preferences not loaded yet, not saving '{}'", table_id);
            return Ok(false);
        }
        if !self.preferences.preferences().remember_view {
            tracing::debug!("Remember view is off, keeping '{}' for this session only", table_id);
            return Ok(false);
        }

        write_json(self.storage.as_ref(), &table_view_key(table_id), &state)?;
        Ok(true)
    }

    /// Forget the state of `table_id`, in memory and in storage.
    ///
    /// Storage is cleared regardless of `rememberView`.
    pub fn clear_view_state(&self, table_id: &str) {
        if let Err(e) = self.try_clear_view_state(table_id) {
            tracing::warn!("Failed to clear view state for '{}': {}", table_id, e);
        }
    }

    /// Like [`clear_view_state`](Self::clear_view_state), but reports the
    /// storage error.
    pub fn try_clear_view_state(&self, table_id: &str) -> Result<()> {
        self.lock().insert(table_id.to_string(), TableViewState::default());
        self.storage.remove_item(&table_view_key(table_id))
    }

    /// Current in-memory state of `table_id`.
    pub fn view_state(&self, table_id: &str) -> TableViewState {
        self.lock().get(table_id).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, TableViewState>> {
        self.views.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for TableViewStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableViewStore")
            .field("tables", &self.lock().len())
            .finish_non_exhaustive()
    }
}
