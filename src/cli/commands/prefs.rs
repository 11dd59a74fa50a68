//! Preferences command implementation.
//!
//! The `align-dash prefs` command shows and changes preferences.

use anyhow::Context;

use crate::cli::args::PrefsAction;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::preferences::{PreferenceKey, PreferenceSet};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The prefs command implementation.
pub struct PrefsCommand<'a> {
    dashboard: &'a Dashboard,
    action: PrefsAction,
}

impl<'a> PrefsCommand<'a> {
    /// Create a new prefs command.
    pub fn new(dashboard: &'a Dashboard, action: PrefsAction) -> Self {
        Self { dashboard, action }
    }

    fn show(&self, ui: &mut dyn UserInterface, json: bool) -> Result<CommandResult> {
        let prefs = self.dashboard.preferences().preferences();
        if json {
            let out = serde_json::to_string_pretty(&prefs).context("serializing preferences")?;
            ui.data(&out);
            return Ok(CommandResult::success());
        }

        ui.show_header("Preferences");
        let mut table = Table::new(&["Preference", "Value"]);
        for key in PreferenceKey::ALL {
            table.add_row([key.as_str().to_string(), prefs.value_of(key)]);
        }
        ui.data(&table.render());
        Ok(CommandResult::success())
    }

    fn set(&self, ui: &mut dyn UserInterface, name: &str, raw: &str) -> Result<CommandResult> {
        let key: PreferenceKey = name.parse()?;
        let update = key.parse_value(raw)?;

        let store = self.dashboard.preferences();
        store.update_preference(update)?;
        store.flush()?;

        ui.success(&format!("{} = {}", key, store.preferences().value_of(key)));
        Ok(CommandResult::success())
    }

    fn reset(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = self.dashboard.preferences();
        store.reset();
        store.flush()?;
        ui.success("Preferences restored to defaults");
        Ok(CommandResult::success())
    }

    fn schema(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = schemars::schema_for!(PreferenceSet);
        let out = serde_json::to_string_pretty(&schema).context("serializing schema")?;
        ui.data(&out);
        Ok(CommandResult::success())
    }
}

impl Command for PrefsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            PrefsAction::Show(args) => self.show(ui, args.json),
            PrefsAction::Set { key, value } => self.set(ui, key, value),
            PrefsAction::Reset => self.reset(ui),
            PrefsAction::Schema => self.schema(ui),
        }
    }
}
