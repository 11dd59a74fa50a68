//! Preference-driven auto-refresh.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use crate::preferences::{ListenerId, PreferenceSet, PreferencesStore};

use super::ticker::{TickCallback, Ticker};

/// Calls a refresh callback on the cadence chosen in the preferences.
///
/// The timer runs only while the instance is enabled **and** the global
/// `autoRefresh` preference is on. The cadence always comes from
/// `autoRefreshIntervalSeconds`; the interval passed to [`new`](Self::new)
/// is kept for callers that read it back but never sets the timer.
///
/// Any change to the enabled flag, the requested interval, the callback or
/// the preferences replaces the armed timer; the old one is cancelled, and
/// a tick it already started finishes before the change returns. Dropping
/// the driver cancels its timer and stops observing preferences.
pub struct AutoRefresh {
    preferences: Arc<PreferencesStore>,
    state: Arc<Mutex<DriverState>>,
    listener: ListenerId,
}

struct DriverState {
    enabled: bool,
    requested_interval: Duration,
    callback: TickCallback,
    generation: u64,
    armed: Option<Armed>,
}

struct Armed {
    generation: u64,
    ticker: Ticker,
}

impl DriverState {
    /// Arm or disarm to match `prefs`. Returns the timer being replaced; the
    /// caller drops it, cancelling it, once the driver lock is released.
    #[must_use]
    fn reconcile(&mut self, prefs: &PreferenceSet) -> Option<Armed> {
        let active = self.enabled && prefs.auto_refresh;
        let cadence = cadence_of(prefs);

        if let Some(armed) = &self.armed {
            if active && armed.generation == self.generation && armed.ticker.interval() == cadence
            {
                return None;
            }
        }

        let stale = self.armed.take();

        if active {
            self.armed = Some(Armed {
                generation: self.generation,
                ticker: Ticker::start(cadence, Arc::clone(&self.callback)),
            });
        } else {
            tracing::debug!(
                "Auto-refresh inactive (enabled: {}, preference: {})",
                self.enabled,
                prefs.auto_refresh
            );
        }
        stale
    }
}

fn cadence_of(prefs: &PreferenceSet) -> Duration {
    Duration::from_secs(u64::from(prefs.auto_refresh_interval_seconds.max(1)))
}

impl AutoRefresh {
    /// Start observing `preferences` and arm the timer if active.
    pub fn new<F>(
        preferences: Arc<PreferencesStore>,
        enabled: bool,
        interval: Duration,
        callback: F,
    ) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let state = Arc::new(Mutex::new(DriverState {
            enabled,
            requested_interval: interval,
            callback: Arc::new(callback),
            generation: 0,
            armed: None,
        }));

        let weak: Weak<Mutex<DriverState>> = Arc::downgrade(&state);
        let listener = preferences.subscribe(move |prefs| {
            if let Some(state) = weak.upgrade() {
                let stale = lock(&state).reconcile(prefs);
                drop(stale);
            }
        });

        let driver = Self {
            preferences,
            state,
            listener,
        };
        driver.reconcile();
        driver
    }

    /// Turn this instance on or off.
    pub fn set_enabled(&self, enabled: bool) {
        let prefs = self.preferences.preferences();
        let stale = {
            let mut state = lock(&self.state);
            if state.enabled == enabled {
                return;
            }
            state.enabled = enabled;
            state.reconcile(&prefs)
        };
        drop(stale);
    }

    /// Change the requested interval.
    ///
    /// The timer is re-armed, still on the cadence from the preferences.
    pub fn set_interval(&self, interval: Duration) {
        let prefs = self.preferences.preferences();
        let stale = {
            let mut state = lock(&self.state);
            if state.requested_interval == interval {
                return;
            }
            state.requested_interval = interval;
            state.generation += 1;
            state.reconcile(&prefs)
        };
        drop(stale);
    }

    /// Replace the refresh callback, re-arming the timer.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let prefs = self.preferences.preferences();
        let stale = {
            let mut state = lock(&self.state);
            state.callback = Arc::new(callback);
            state.generation += 1;
            state.reconcile(&prefs)
        };
        drop(stale);
    }

    /// Check whether a timer is armed.
    pub fn is_active(&self) -> bool {
        lock(&self.state).armed.is_some()
    }

    /// Cadence of the armed timer.
    pub fn cadence(&self) -> Option<Duration> {
        lock(&self.state)
            .armed
            .as_ref()
            .map(|armed| armed.ticker.interval())
    }

    /// The interval passed by the caller.
    pub fn requested_interval(&self) -> Duration {
        lock(&self.state).requested_interval
    }

    /// Ticks fired by the currently armed timer.
    pub fn ticks(&self) -> u64 {
        lock(&self.state)
            .armed
            .as_ref()
            .map(|armed| armed.ticker.ticks())
            .unwrap_or(0)
    }

    fn reconcile(&self) {
        let prefs = self.preferences.preferences();
        let stale = lock(&self.state).reconcile(&prefs);
        drop(stale);
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.preferences.unsubscribe(self.listener);
        let armed = lock(&self.state).armed.take();
        drop(armed);
    }
}

impl std::fmt::Debug for AutoRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoRefresh")
            .field("active", &self.is_active())
            .field("cadence", &self.cadence())
            .field("requested_interval", &self.requested_interval())
            .finish()
    }
}

fn lock(state: &Mutex<DriverState>) -> MutexGuard<'_, DriverState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}
