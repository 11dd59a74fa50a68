//! Favorites command implementation.

use crate::cli::args::FavoriteAction;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_links};

/// The favorite command implementation.
pub struct FavoriteCommand<'a> {
    dashboard: &'a Dashboard,
    action: FavoriteAction,
}

impl<'a> FavoriteCommand<'a> {
    /// Create a new favorite command.
    pub fn new(dashboard: &'a Dashboard, action: FavoriteAction) -> Self {
        Self { dashboard, action }
    }
}

impl Command for FavoriteCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let navigation = self.dashboard.navigation();
        match &self.action {
            FavoriteAction::Toggle(link) => {
                let added = navigation.toggle_favorite(&link.href, &link.label);
                navigation.flush()?;
                if added {
                    ui.success(&format!("★ {} added to favorites", link.label));
                } else {
                    ui.success(&format!("{} removed from favorites", link.label));
                }
            }
            FavoriteAction::List(args) => {
                let favorites = navigation.favorites();
                if args.json {
                    show_json(ui, &favorites)?;
                } else {
                    show_links(ui, &favorites, "No favorites yet.");
                }
            }
        }
        Ok(CommandResult::success())
    }
}
