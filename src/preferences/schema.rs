//! Preference definitions.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashError, Result};

/// Row spacing used by data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableDensity {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

impl TableDensity {
    /// All densities in display order.
    pub const ALL: [TableDensity; 3] = [Self::Compact, Self::Comfortable, Self::Spacious];

    /// Lowercase name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Comfortable => "comfortable",
            Self::Spacious => "spacious",
        }
    }
}

impl fmt::Display for TableDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableDensity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "comfortable" => Ok(Self::Comfortable),
            "spacious" => Ok(Self::Spacious),
            _ => Err(format!("unknown table density: {}", s)),
        }
    }
}

/// Durable user settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    /// Row spacing for data tables.
    pub table_density: TableDensity,

    /// Whether pages refresh their data on a timer.
    pub auto_refresh: bool,

    /// Seconds between automatic refreshes. Always positive.
    #[serde(alias = "autoRefreshInterval")]
    pub auto_refresh_interval_seconds: u32,

    /// Whether per-table sort, filter and page state survives reloads.
    pub remember_view: bool,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            table_density: TableDensity::Comfortable,
            auto_refresh: false,
            auto_refresh_interval_seconds: Self::DEFAULT_INTERVAL_SECONDS,
            remember_view: true,
        }
    }
}

impl PreferenceSet {
    /// Default auto-refresh cadence.
    pub const DEFAULT_INTERVAL_SECONDS: u32 = 60;

    /// Overlay persisted fields on top of the defaults.
    ///
    /// Each field is taken from `value` when present and valid; missing or
    /// invalid fields keep their default. Returns `None` when `value` is not
    /// a JSON object.
    pub fn merged_over_defaults(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut prefs = Self::default();

        if let Some(density) = field(obj, &["tableDensity"]) {
            prefs.table_density = density;
        }
        if let Some(auto_refresh) = field(obj, &["autoRefresh"]) {
            prefs.auto_refresh = auto_refresh;
        }
        match field::<u32>(obj, &["autoRefreshIntervalSeconds", "autoRefreshInterval"]) {
            Some(0) => tracing::warn!("Ignoring persisted auto-refresh interval of 0"),
            Some(seconds) => prefs.auto_refresh_interval_seconds = seconds,
            None => {}
        }
        if let Some(remember_view) = field(obj, &["rememberView"]) {
            prefs.remember_view = remember_view;
        }

        Some(prefs)
    }

    /// Apply a single-field update.
    pub fn apply(&mut self, update: PreferenceUpdate) -> Result<()> {
        match update {
            PreferenceUpdate::TableDensity(density) => self.table_density = density,
            PreferenceUpdate::AutoRefresh(enabled) => self.auto_refresh = enabled,
            PreferenceUpdate::AutoRefreshIntervalSeconds(0) => {
                return Err(DashError::InvalidPreference {
                    key: PreferenceKey::AutoRefreshIntervalSeconds.as_str().to_string(),
                    message: "interval must be at least 1 second".to_string(),
                });
            }
            PreferenceUpdate::AutoRefreshIntervalSeconds(seconds) => {
                self.auto_refresh_interval_seconds = seconds
            }
            PreferenceUpdate::RememberView(remember) => self.remember_view = remember,
        }
        Ok(())
    }

    /// Display value of one field.
    pub fn value_of(&self, key: PreferenceKey) -> String {
        match key {
            PreferenceKey::TableDensity => self.table_density.to_string(),
            PreferenceKey::AutoRefresh => self.auto_refresh.to_string(),
            PreferenceKey::AutoRefreshIntervalSeconds => {
                self.auto_refresh_interval_seconds.to_string()
            }
            PreferenceKey::RememberView => self.remember_view.to_string(),
        }
    }
}

/// Read the first of `names` present in `obj`, logging values of the wrong type.
fn field<T: DeserializeOwned>(
    obj: &serde_json::Map<String, serde_json::Value>,
    names: &[&str],
) -> Option<T> {
    let (name, raw) = names
        .iter()
        .find_map(|name| obj.get(*name).map(|raw| (*name, raw)))?;

    match serde_json::from_value(raw.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring persisted preference '{}': {}", name, e);
            None
        }
    }
}

/// Identifies one preference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    TableDensity,
    AutoRefresh,
    AutoRefreshIntervalSeconds,
    RememberView,
}

impl PreferenceKey {
    /// All keys in display order.
    pub const ALL: [PreferenceKey; 4] = [
        Self::TableDensity,
        Self::AutoRefresh,
        Self::AutoRefreshIntervalSeconds,
        Self::RememberView,
    ];

    /// Field name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TableDensity => "tableDensity",
            Self::AutoRefresh => "autoRefresh",
            Self::AutoRefreshIntervalSeconds => "autoRefreshIntervalSeconds",
            Self::RememberView => "rememberView",
        }
    }

    /// Parse a raw string into an update for this key.
    pub fn parse_value(&self, raw: &str) -> Result<PreferenceUpdate> {
        let invalid = |message: String| DashError::InvalidPreference {
            key: self.as_str().to_string(),
            message,
        };

        match self {
            Self::TableDensity => raw
                .parse()
                .map(PreferenceUpdate::TableDensity)
                .map_err(invalid),
            Self::AutoRefresh => parse_bool(raw)
                .map(PreferenceUpdate::AutoRefresh)
                .ok_or_else(|| invalid(format!("expected true or false, got '{}'", raw))),
            Self::AutoRefreshIntervalSeconds => raw
                .trim()
                .parse::<u32>()
                .map(PreferenceUpdate::AutoRefreshIntervalSeconds)
                .map_err(|_| invalid(format!("expected a number of seconds, got '{}'", raw))),
            Self::RememberView => parse_bool(raw)
                .map(PreferenceUpdate::RememberView)
                .ok_or_else(|| invalid(format!("expected true or false, got '{}'", raw))),
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = DashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "table-density" | "tableDensity" | "density" => Ok(Self::TableDensity),
            "auto-refresh" | "autoRefresh" => Ok(Self::AutoRefresh),
            "auto-refresh-interval" | "autoRefreshIntervalSeconds" | "autoRefreshInterval" => {
                Ok(Self::AutoRefreshIntervalSeconds)
            }
            "remember-view" | "rememberView" => Ok(Self::RememberView),
            other => Err(DashError::UnknownPreference {
                name: other.to_string(),
            }),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// A single-field change to a [`PreferenceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceUpdate {
    TableDensity(TableDensity),
    AutoRefresh(bool),
    AutoRefreshIntervalSeconds(u32),
    RememberView(bool),
}

impl PreferenceUpdate {
    /// The field this update touches.
    pub fn key(&self) -> PreferenceKey {
        match self {
            Self::TableDensity(_) => PreferenceKey::TableDensity,
            Self::AutoRefresh(_) => PreferenceKey::AutoRefresh,
            Self::AutoRefreshIntervalSeconds(_) => PreferenceKey::AutoRefreshIntervalSeconds,
            Self::RememberView(_) => PreferenceKey::RememberView,
        }
    }
}
