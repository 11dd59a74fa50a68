//! align-dash - Client-side state for the Align Academy dashboard.
//!
//! The dashboard keeps a handful of small, durable stores in the browser's
//! key/value storage. This crate implements them against a pluggable
//! [`storage::Storage`] backend.
//!
//! # Modules
//!
//! - [`preferences`] - Table density, auto-refresh and remember-view settings
//! - [`navigation`] - Recent pages, favorites and quick links
//! - [`table_view`] - Per-table sort, filter and pagination state
//! - [`refresh`] - Auto-refresh timer driven by the preferences
//! - [`a11y`] - Screen-reader announcements and keyboard navigation helpers
//! - [`dashboard`] - Wiring of all stores over one storage backend
//! - [`storage`] - Storage trait plus in-memory and file backends
//! - [`config`] - Configuration loading and validation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use align_dash::dashboard::Dashboard;
//! use align_dash::storage::MemoryStorage;
//!
//! let dashboard = Dashboard::builder()
//!     .storage(Arc::new(MemoryStorage::new()))
//!     .build()
//!     .unwrap();
//! dashboard.load();
//!
//! dashboard.navigation().add_recent_item("/analytics", "Analytics");
//! assert_eq!(dashboard.navigation().recent_items()[0].label, "Analytics");
//! ```

pub mod a11y;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod preferences;
pub mod refresh;
pub mod storage;
pub mod table_view;
pub mod ui;

pub use error::{DashError, Result};
