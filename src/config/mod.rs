//! Configuration loading and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use align_dash::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("config.yml"), "recent_capacity: 10").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.recent_capacity, 10);
//! assert_eq!(config.quick_link_capacity, 6);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{config_path, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::DashConfig;
pub use validator::{validate, validate_config, ValidationError};
