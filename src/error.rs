//! Error types for dashboard state operations.
//!
//! This module defines [`DashError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Storage failures surface as `DashError` from the [`Storage`](crate::storage::Storage)
//!   backends; the stores log them and keep their in-memory state
//! - Invalid values and wiring defects are returned to the caller immediately
//! - Use `anyhow::Error` (via `DashError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dashboard state operations.
#[derive(Debug, Error)]
pub enum DashError {
    /// The storage backend cannot be read or written at all.
    #[error("Storage unavailable for key '{key}': {message}")]
    StorageUnavailable { key: String, message: String },

    /// A write would exceed the storage quota.
    #[error("Storage quota exceeded writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// A value could not be serialized for storage.
    #[error("Failed to serialize '{key}': {message}")]
    Serialization { key: String, message: String },

    /// A preference update carried a value outside its domain.
    #[error("Invalid value for preference '{key}': {message}")]
    InvalidPreference { key: String, message: String },

    /// A preference name did not match any known preference.
    #[error("Unknown preference: {name}")]
    UnknownPreference { name: String },

    /// A required collaborator was not supplied when wiring the dashboard.
    #[error("Missing dependency: {name} must be provided before building the dashboard")]
    MissingDependency { name: String },

    /// The page has no main-content landmark to skip to.
    #[error("No main content landmark '{id}' to focus")]
    MissingLandmark { id: String },

    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for dashboard state operations.
pub type Result<T> = std::result::Result<T, DashError>;
