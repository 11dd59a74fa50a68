//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which opens the
//! dashboard stores over the data directory once and hands them to the
//! command for the chosen subcommand.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod favorite;
pub mod prefs;
pub mod quick_link;
pub mod recent;
pub mod view;
pub mod watch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
