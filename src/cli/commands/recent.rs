//! Recent pages command implementation.

use chrono::Utc;

use crate::cli::args::RecentAction;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_recent};

/// The recent command implementation.
pub struct RecentCommand<'a> {
    dashboard: &'a Dashboard,
    action: RecentAction,
}

impl<'a> RecentCommand<'a> {
    /// Create a new recent command.
    pub fn new(dashboard: &'a Dashboard, action: RecentAction) -> Self {
        Self { dashboard, action }
    }
}

impl Command for RecentCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let navigation = self.dashboard.navigation();
        match &self.action {
            RecentAction::Add(link) => {
                navigation.add_recent_item(&link.href, &link.label);
                navigation.flush()?;
                ui.success(&format!("Visited {} ({})", link.label, link.href));
            }
            RecentAction::List(args) => {
                let items = navigation.recent_items();
                if args.json {
                    show_json(ui, &items)?;
                } else {
                    show_recent(ui, &items, Utc::now());
                }
            }
            RecentAction::Clear => {
                navigation.clear_recent_items();
                navigation.flush()?;
                ui.success("Recent pages cleared");
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{JsonArgs, LinkArgs};
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;
    use crate::ui::MockUI;
    use std::sync::Arc;

    fn link(href: &str, label: &str) -> LinkArgs {
        LinkArgs {
            href: href.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn add_then_list_json() {
        let clock = Arc::new(ManualClock::new(1_000));
        let dash = Dashboard::builder()
            .storage(Arc::new(MemoryStorage::new()))
            .clock(clock.clone())
            .build()
            .unwrap();
        dash.load();

        let mut ui = MockUI::new();
        for (href, label) in [("/sla", "SLA"), ("/csat", "CSAT"), ("/sla", "SLA")] {
            clock.advance(10);
            RecentCommand::new(&dash, RecentAction::Add(link(href, label)))
                .execute(&mut ui)
                .unwrap();
        }

        RecentCommand::new(&dash, RecentAction::List(JsonArgs { json: true }))
            .execute(&mut ui)
            .unwrap();
        let items: serde_json::Value = serde_json::from_str(&ui.payloads()[0]).unwrap();
        assert_eq!(items[0]["href"], "/sla");
        assert_eq!(items[0]["timestamp"], 1_030);
        assert_eq!(items[1]["href"], "/csat");
        assert_eq!(items.as_array().unwrap().len(), 2);
    }

    #[test]
    fn clear_empties_list() {
        let dash = Dashboard::builder()
            .storage(Arc::new(MemoryStorage::new()))
            .build()
            .unwrap();
        dash.load();
        dash.navigation().add_recent_item("/a", "A");

        let mut ui = MockUI::new();
        RecentCommand::new(&dash, RecentAction::Clear)
            .execute(&mut ui)
            .unwrap();
        assert!(dash.navigation().recent_items().is_empty());

        RecentCommand::new(&dash, RecentAction::List(JsonArgs::default()))
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("No recent pages"));
    }
}
