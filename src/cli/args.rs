//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::table_view::SortOrder;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ALIGN_DASH_HOME";

/// align-dash - Align Academy dashboard preferences, navigation and view state.
#[derive(Debug, Parser)]
#[command(name = "align-dash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding stored state and config.yml (default ~/.align-dash)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Path to config file (overrides <data-dir>/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The data directory in effect.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".align-dash")
        })
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show and change preferences
    #[command(subcommand)]
    Prefs(PrefsAction),

    /// Recently visited pages
    #[command(subcommand)]
    Recent(RecentAction),

    /// Favorite pages
    #[command(subcommand)]
    Favorite(FavoriteAction),

    /// Quick links
    #[command(subcommand)]
    QuickLink(QuickLinkAction),

    /// Per-table sort, filter and pagination state
    #[command(subcommand)]
    View(ViewAction),

    /// Run the auto-refresh timer, printing a line per tick
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// `prefs` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PrefsAction {
    /// Show current preferences
    Show(JsonArgs),

    /// Change one preference
    Set {
        /// Preference name (table-density, auto-refresh, auto-refresh-interval, remember-view)
        key: String,
        /// New value
        value: String,
    },

    /// Restore default preferences
    Reset,

    /// Print the JSON Schema of stored preferences
    Schema,
}

/// `recent` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RecentAction {
    /// Record a page visit
    Add(LinkArgs),

    /// List recent pages, newest first
    List(JsonArgs),

    /// Forget all recent pages
    Clear,
}

/// `favorite` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum FavoriteAction {
    /// Add a page to favorites, or remove it if already there
    Toggle(LinkArgs),

    /// List favorites
    List(JsonArgs),
}

/// `quick-link` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum QuickLinkAction {
    /// Add a quick link
    Add(LinkArgs),

    /// Remove a quick link
    Remove {
        /// Link target
        href: String,
    },

    /// List quick links
    List(JsonArgs),
}

/// `view` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ViewAction {
    /// Save a table's view state
    Save(ViewSaveArgs),

    /// Show a table's stored view state
    Show {
        /// Table identifier
        table: String,
        #[command(flatten)]
        json: JsonArgs,
    },

    /// Forget a table's view state
    Clear {
        /// Table identifier
        table: String,
    },
}

/// A page reference.
#[derive(Debug, Clone, clap::Args)]
pub struct LinkArgs {
    /// Link target, e.g. /analytics
    pub href: String,

    /// Display label
    pub label: String,
}

/// Output format switch.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct JsonArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `view save`.
#[derive(Debug, Clone, clap::Args)]
pub struct ViewSaveArgs {
    /// Table identifier
    pub table: String,

    /// Column to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc or desc)
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    /// Filter as key=value (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Current page
    #[arg(long)]
    pub page: Option<u32>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct WatchArgs {
    /// Requested interval in seconds (the preference takes precedence)
    #[arg(long, default_value_t = 30)]
    pub interval: u64,

    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Run even when the auto-refresh preference is off, without saving it
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_view_save_filters() {
        let cli = Cli::parse_from([
            "align-dash",
            "view",
            "save",
            "agents",
            "--sort-order",
            "desc",
            "--filter",
            "team=north",
            "--filter",
            "status=",
        ]);
        match cli.command {
            Commands::View(ViewAction::Save(args)) => {
                assert_eq!(args.table, "agents");
                assert_eq!(args.sort_order, Some(SortOrder::Desc));
                assert_eq!(
                    args.filters,
                    vec![
                        ("team".to_string(), "north".to_string()),
                        ("status".to_string(), String::new()),
                    ]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_filter_without_equals() {
        let result = Cli::try_parse_from(["align-dash", "view", "save", "t", "--filter", "oops"]);
        assert!(result.is_err());
    }

    #[test]
    fn data_dir_flag_wins() {
        let cli = Cli::parse_from(["align-dash", "--data-dir", "/tmp/x", "recent", "clear"]);
        assert_eq!(cli.resolved_data_dir(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["align-dash", "prefs", "show", "--json", "--quiet"]);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Prefs(PrefsAction::Show(JsonArgs { json: true }))
        ));
    }
}
