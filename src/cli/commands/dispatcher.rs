//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::config::load_config;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::storage::FileStorage;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    data_dir: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher over `data_dir`, optionally with an explicit config file.
    pub fn new(data_dir: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            data_dir,
            config_path,
        }
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Build and load the dashboard stores over the data directory.
    pub fn open_dashboard(&self) -> Result<Dashboard> {
        let config = load_config(&self.data_dir, self.config_path.as_deref())?;
        tracing::debug!(
            "Opening dashboard state in {:?} (namespace '{}')",
            self.data_dir,
            config.namespace
        );

        let dashboard = Dashboard::builder()
            .storage(Arc::new(FileStorage::new(&self.data_dir)))
            .config(config)
            .build()?;
        dashboard.load();
        Ok(dashboard)
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let dashboard = self.open_dashboard()?;
        match &cli.command {
            Commands::Prefs(action) => {
                super::prefs::PrefsCommand::new(&dashboard, action.clone()).execute(ui)
            }
            Commands::Recent(action) => {
                super::recent::RecentCommand::new(&dashboard, action.clone()).execute(ui)
            }
            Commands::Favorite(action) => {
                super::favorite::FavoriteCommand::new(&dashboard, action.clone()).execute(ui)
            }
            Commands::QuickLink(action) => {
                super::quick_link::QuickLinkCommand::new(&dashboard, action.clone()).execute(ui)
            }
            Commands::View(action) => {
                super::view::ViewCommand::new(&dashboard, action.clone()).execute(ui)
            }
            Commands::Watch(args) => {
                super::watch::WatchCommand::new(&dashboard, args.clone()).execute(ui)
            }
            Commands::Completions(_) => Ok(CommandResult::success()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatch_records_visit_in_data_dir() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf(), None);
        let mut ui = MockUI::new();

        let cli = Cli::parse_from(["align-dash", "recent", "add", "/sla", "SLA"]);
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);

        let dashboard = dispatcher.open_dashboard().unwrap();
        assert_eq!(dashboard.navigation().recent_items()[0].href, "/sla");
    }

    #[test]
    fn invalid_config_fails_dispatch() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.yml"), "recent_capacity: 0").unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf(), None);

        let cli = Cli::parse_from(["align-dash", "recent", "list"]);
        let err = dispatcher.dispatch(&cli, &mut MockUI::new()).unwrap_err();
        assert!(matches!(err, DashError::ConfigValidationError { .. }));
    }
}
