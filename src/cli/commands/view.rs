//! Table view state command implementation.

use crate::cli::args::{ViewAction, ViewSaveArgs};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::table_view::TableViewState;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::show_json;

/// The view command implementation.
pub struct ViewCommand<'a> {
    dashboard: &'a Dashboard,
    action: ViewAction,
}

impl<'a> ViewCommand<'a> {
    /// Create a new view command.
    pub fn new(dashboard: &'a Dashboard, action: ViewAction) -> Self {
        Self { dashboard, action }
    }

    fn save(&self, ui: &mut dyn UserInterface, args: &ViewSaveArgs) -> Result<CommandResult> {
        let state = state_from_args(args);
        let saved = self
            .dashboard
            .table_views()
            .try_save_view_state(&args.table, state)?;

        if saved {
            ui.success(&format!("Saved view for '{}'", args.table));
        } else {
            ui.warning(&format!(
                "remember-view is off; view for '{}' was not saved",
                args.table
            ));
        }
        Ok(CommandResult::success())
    }

    fn show(&self, ui: &mut dyn UserInterface, table: &str, json: bool) -> Result<CommandResult> {
        let state = self.dashboard.table_views().load_view_state(table);
        if json {
            show_json(ui, &state)?;
            return Ok(CommandResult::success());
        }
        if state.is_empty() {
            ui.message(&format!("No saved view for '{}'.", table));
            return Ok(CommandResult::success());
        }
        ui.data(&render_state(&state));
        Ok(CommandResult::success())
    }
}

impl Command for ViewCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            ViewAction::Save(args) => self.save(ui, args),
            ViewAction::Show { table, json } => self.show(ui, table, json.json),
            ViewAction::Clear { table } => {
                self.dashboard.table_views().try_clear_view_state(table)?;
                ui.success(&format!("Cleared view for '{}'", table));
                Ok(CommandResult::success())
            }
        }
    }
}

fn state_from_args(args: &ViewSaveArgs) -> TableViewState {
    let filters = if args.filters.is_empty() {
        None
    } else {
        Some(args.filters.iter().cloned().collect())
    };
    TableViewState {
        sort_by: args.sort_by.clone(),
        sort_order: args.sort_order,
        filters,
        page: args.page,
        page_size: args.page_size,
    }
}

fn render_state(state: &TableViewState) -> String {
    let mut table = Table::new(&["Field", "Value"]);
    if let Some(sort_by) = &state.sort_by {
        table.add_row(["sortBy", sort_by.as_str()]);
    }
    if let Some(order) = state.sort_order {
        table.add_row(["sortOrder".to_string(), order.to_string()]);
    }
    for (key, value) in state.filters.iter().flatten() {
        table.add_row([format!("filter.{}", key), value.clone()]);
    }
    if let Some(page) = state.page {
        table.add_row(["page".to_string(), page.to_string()]);
    }
    if let Some(size) = state.page_size {
        table.add_row(["pageSize".to_string(), size.to_string()]);
    }
    table.render()
}
