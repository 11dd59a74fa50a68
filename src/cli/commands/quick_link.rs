//! Quick links command implementation.

use crate::cli::args::QuickLinkAction;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_links};

/// The quick-link command implementation.
pub struct QuickLinkCommand<'a> {
    dashboard: &'a Dashboard,
    action: QuickLinkAction,
}

impl<'a> QuickLinkCommand<'a> {
    /// Create a new quick-link command.
    pub fn new(dashboard: &'a Dashboard, action: QuickLinkAction) -> Self {
        Self { dashboard, action }
    }
}

impl Command for QuickLinkCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let navigation = self.dashboard.navigation();
        match &self.action {
            QuickLinkAction::Add(link) => {
                if navigation.add_quick_link(&link.href, &link.label) {
                    navigation.flush()?;
                    ui.success(&format!("Added quick link {}", link.label));
                } else {
                    let limit = navigation.limits().quick_links;
                    ui.warning(&format!(
                        "Quick link {} not added (already present or {} links is the limit)",
                        link.href, limit
                    ));
                }
            }
            QuickLinkAction::Remove { href } => {
                if navigation.remove_quick_link(href) {
                    navigation.flush()?;
                    ui.success(&format!("Removed quick link {}", href));
                } else {
                    ui.warning(&format!("No quick link for {}", href));
                }
            }
            QuickLinkAction::List(args) => {
                let links = navigation.quick_links();
                if args.json {
                    show_json(ui, &links)?;
                } else {
                    show_links(ui, &links, "No quick links.");
                }
            }
        }
        Ok(CommandResult::success())
    }
}
