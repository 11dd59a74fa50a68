//! Wiring for the dashboard stores.
//!
//! A [`Dashboard`] owns one instance of each store, all sharing the same
//! storage backend and clock. Components receive the handles they need from
//! it instead of reaching for process-wide globals.

use std::sync::Arc;
use std::time::Duration;

use crate::a11y::Announcer;
use crate::clock::{Clock, SystemClock};
use crate::config::DashConfig;
use crate::error::{DashError, Result};
use crate::navigation::NavigationStore;
use crate::preferences::PreferencesStore;
use crate::refresh::AutoRefresh;
use crate::storage::Storage;
use crate::table_view::TableViewStore;

/// The stores behind one dashboard session.
pub struct Dashboard {
    config: DashConfig,
    preferences: Arc<PreferencesStore>,
    navigation: Arc<NavigationStore>,
    table_views: TableViewStore,
    announcer: Announcer,
}

impl Dashboard {
    /// Start building a dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Read persisted preferences and navigation lists.
    ///
    /// Until this runs, both stores serve defaults and skip persistence.
    pub fn load(&self) {
        self.preferences.load();
        self.navigation.load();
    }

    /// The effective configuration.
    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    /// Shared preferences store.
    pub fn preferences(&self) -> &Arc<PreferencesStore> {
        &self.preferences
    }

    /// Shared navigation store.
    pub fn navigation(&self) -> &Arc<NavigationStore> {
        &self.navigation
    }

    /// Per-table view state.
    pub fn table_views(&self) -> &TableViewStore {
        &self.table_views
    }

    /// Screen-reader live region.
    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    /// Attach an auto-refresh driver to this dashboard's preferences.
    pub fn auto_refresh<F>(&self, enabled: bool, interval: Duration, callback: F) -> AutoRefresh
    where
        F: Fn() + Send + Sync + 'static,
    {
        AutoRefresh::new(Arc::clone(&self.preferences), enabled, interval, callback)
    }
}

/// Builder for [`Dashboard`].
#[derive(Default)]
pub struct DashboardBuilder {
    storage: Option<Arc<dyn Storage>>,
    clock: Option<Arc<dyn Clock>>,
    config: Option<DashConfig>,
}

impl DashboardBuilder {
    /// Storage backend shared by every store. Required.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Time source for recent-item timestamps and announcements.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Namespace and capacities.
    pub fn config(mut self, config: DashConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Assemble the stores.
    ///
    /// # Errors
    ///
    /// Returns `MissingDependency` when no storage was supplied.
    pub fn build(self) -> Result<Dashboard> {
        let storage = self.storage.ok_or_else(|| DashError::MissingDependency {
            name: "storage".to_string(),
        })?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let config = self.config.unwrap_or_default();
        let keys = config.storage_keys();

        let preferences = Arc::new(PreferencesStore::new(
            Arc::clone(&storage),
            keys.preferences(),
        ));
        let navigation = Arc::new(
            NavigationStore::new(Arc::clone(&storage), keys.navigation())
                .with_clock(Arc::clone(&clock))
                .with_limits(config.navigation_limits()),
        );
        let table_views = TableViewStore::new(storage, Arc::clone(&preferences));
        let clear_after = i64::try_from(config.announcement_clear_ms).unwrap_or(i64::MAX);
        let announcer = Announcer::with_clock(clock).clear_after(clear_after);

        Ok(Dashboard {
            config,
            preferences,
            navigation,
            table_views,
            announcer,
        })
    }
}
