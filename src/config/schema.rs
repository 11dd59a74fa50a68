//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::navigation::NavigationLimits;
use crate::storage::{StorageKeys, DEFAULT_NAMESPACE};

/// Settings read from `config.yml` in the data directory.
///
/// Every field is optional in the file; omitted fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Prefix of the preferences and navigation storage keys.
    pub namespace: String,

    /// Number of recent items kept.
    pub recent_capacity: usize,

    /// Number of quick links accepted.
    pub quick_link_capacity: usize,

    /// Milliseconds before a screen-reader announcement is cleared.
    pub announcement_clear_ms: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            recent_capacity: NavigationLimits::DEFAULT_RECENT_ITEMS,
            quick_link_capacity: NavigationLimits::DEFAULT_QUICK_LINKS,
            announcement_clear_ms: 1_000,
        }
    }
}

impl DashConfig {
    /// Storage keys under the configured namespace.
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(self.namespace.clone())
    }

    /// List capacities for the navigation store.
    pub fn navigation_limits(&self) -> NavigationLimits {
        NavigationLimits {
            recent_items: self.recent_capacity,
            quick_links: self.quick_link_capacity,
        }
    }
}
