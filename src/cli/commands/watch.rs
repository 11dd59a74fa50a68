//! Watch command implementation.
//!
//! The `align-dash watch` command runs the auto-refresh driver in the
//! foreground and prints a line for every tick.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::cli::args::WatchArgs;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::preferences::{PreferenceSet, PreferenceUpdate, PreferencesStore};
use crate::refresh::AutoRefresh;
use crate::storage::MemoryStorage;
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The watch command implementation.
pub struct WatchCommand<'a> {
    dashboard: &'a Dashboard,
    args: WatchArgs,
}

impl<'a> WatchCommand<'a> {
    /// Create a new watch command.
    pub fn new(dashboard: &'a Dashboard, args: WatchArgs) -> Self {
        Self { dashboard, args }
    }

    fn preferences(&self) -> Result<Arc<PreferencesStore>> {
        let stored = self.dashboard.preferences();
        if !self.args.force {
            return Ok(Arc::clone(stored));
        }
        session_override(stored.key(), &stored.preferences())
    }
}

/// A throwaway store holding `current` with auto-refresh switched on.
fn session_override(key: &str, current: &PreferenceSet) -> Result<Arc<PreferencesStore>> {
    let store = PreferencesStore::new(Arc::new(MemoryStorage::new()), key);
    store.load();
    for update in [
        PreferenceUpdate::TableDensity(current.table_density),
        PreferenceUpdate::AutoRefreshIntervalSeconds(current.auto_refresh_interval_seconds),
        PreferenceUpdate::RememberView(current.remember_view),
        PreferenceUpdate::AutoRefresh(true),
    ] {
        store.update_preference(update)?;
    }
    Ok(Arc::new(store))
}

impl Command for WatchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let preferences = self.preferences()?;
        let requested = Duration::from_secs(self.args.interval);

        let (tx, rx) = mpsc::channel();
        let driver = AutoRefresh::new(preferences, true, requested, move || {
            let _ = tx.send(());
        });

        let Some(cadence) = driver.cadence() else {
            ui.warning(
                "Auto-refresh is off. Run `align-dash prefs set auto-refresh true` or pass --force.",
            );
            return Ok(CommandResult::success());
        };

        if cadence != requested {
            tracing::debug!(
                "Requested interval {:?} superseded by preference {:?}",
                requested,
                cadence
            );
        }
        ui.message(&format!("Refreshing every {}", format_duration(cadence)));

        let mut ticks = 0u64;
        while self.args.ticks.is_none_or(|max| ticks < max) {
            if rx.recv().is_err() {
                break;
            }
            ticks += 1;
            ui.message(&format!("Refresh #{} at {}", ticks, Local::now().format("%H:%M:%S")));
        }

        drop(driver);
        ui.success(&format!(
            "Stopped after {} refresh{}",
            ticks,
            if ticks == 1 { "" } else { "es" }
        ));
        Ok(CommandResult::success())
    }
}
