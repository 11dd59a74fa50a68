//! Shared display helpers for navigation listings.
//!
//! Used by `recent`, `favorite` and `quick-link` so every list renders the
//! same way.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::navigation::{NavLink, RecentItem};
use crate::ui::{format_relative_time, Table, UserInterface};

/// Write `value` as pretty JSON.
pub fn show_json<T: Serialize + ?Sized>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    ui.data(&out);
    Ok(())
}

/// Render links as a table, or a hint when there are none.
pub fn show_links(ui: &mut dyn UserInterface, links: &[NavLink], empty_hint: &str) {
    if links.is_empty() {
        ui.message(empty_hint);
        return;
    }
    let mut table = Table::new(&["Label", "Href"]);
    for link in links {
        table.add_row([link.label.as_str(), link.href.as_str()]);
    }
    ui.data(&table.render());
}

/// Render recent items newest first, with visit times relative to `now`.
pub fn show_recent(ui: &mut dyn UserInterface, items: &[RecentItem], now: DateTime<Utc>) {
    if items.is_empty() {
        ui.message("No recent pages.");
        return;
    }
    let mut table = Table::new(&["Label", "Href", "Visited"]);
    for item in items {
        let visited = item
            .visited_at()
            .map(|at| format_relative_time(at, now))
            .unwrap_or_else(|| "unknown".to_string());
        table.add_row([item.label.clone(), item.href.clone(), visited]);
    }
    ui.data(&table.render());
}
