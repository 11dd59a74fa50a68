//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DashConfig;
use crate::config::validator::validate;
use crate::error::{DashError, Result};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Path of the configuration file for `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

/// Parse YAML content into a config.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DashConfig> {
    if content.trim().is_empty() {
        return Ok(DashConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DashError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if a value is out of range.
pub fn load_config_file(path: &Path) -> Result<DashConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DashError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DashError::Io(e)
        }
    })?;

    let config = parse_config(&content, path)?;
    validate(&config)?;
    Ok(config)
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, `config.yml` in `data_dir` is
/// used when present and the defaults otherwise.
pub fn load_config(data_dir: &Path, config_override: Option<&Path>) -> Result<DashConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    let path = config_path(data_dir);
    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return Ok(DashConfig::default());
    }
    load_config_file(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_default_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn loads_file_from_data_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(config_path(temp.path()), "namespace: staging\n").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.namespace, "staging");
    }

    #[test]
    fn missing_override_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, DashError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(config_path(temp.path()), "recent_capacity: [oops").unwrap();

        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, DashError::ConfigParseError { .. }));
    }

    #[test]
    fn out_of_range_is_validation_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "quick_link_capacity: 0").unwrap();

        let err = load_config(temp.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, DashError::ConfigValidationError { .. }));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(config_path(temp.path()), "\n").unwrap();
        assert_eq!(
            load_config(temp.path(), None).unwrap(),
            DashConfig::default()
        );
    }
}
