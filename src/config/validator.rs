//! Configuration validation rules.
//!
//! - The namespace must be non-empty and free of whitespace
//! - List capacities must be at least 1

use crate::config::schema::DashConfig;
use crate::error::{DashError, Result};

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field the rule applies to.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
}

/// Collect every violation in `config`.
pub fn validate_config(config: &DashConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.namespace.trim().is_empty() {
        errors.push(ValidationError {
            field: "namespace".to_string(),
            message: "namespace must not be empty".to_string(),
        });
    } else if config.namespace.chars().any(char::is_whitespace) {
        errors.push(ValidationError {
            field: "namespace".to_string(),
            message: format!("namespace '{}' must not contain whitespace", config.namespace),
        });
    }

    if config.recent_capacity == 0 {
        errors.push(ValidationError {
            field: "recent_capacity".to_string(),
            message: "recent_capacity must be at least 1".to_string(),
        });
    }

    if config.quick_link_capacity == 0 {
        errors.push(ValidationError {
            field: "quick_link_capacity".to_string(),
            message: "quick_link_capacity must be at least 1".to_string(),
        });
    }

    errors
}

/// Validate `config`, joining all violations into one error.
pub fn validate(config: &DashConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(DashError::ConfigValidationError { message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&DashConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let config = DashConfig {
            namespace: " ".to_string(),
            recent_capacity: 0,
            quick_link_capacity: 0,
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "namespace");
    }

    #[test]
    fn whitespace_namespace_rejected() {
        let config = DashConfig {
            namespace: "align academy".to_string(),
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }
}
