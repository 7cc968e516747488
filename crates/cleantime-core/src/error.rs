//! Core error types for cleantime-core.
//!
//! Every failure is scoped to a single user action: storage errors are
//! reported and the action can be retried by hand, validation errors leave
//! state untouched, and clock skew is clamped instead of surfaced.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cleantime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by a whole-document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The persisted slot could not be read or decoded.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The persisted slot could not be replaced.
    #[error("failed to write storage: {0}")]
    WriteFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration field
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not locate the data directory
    #[error("Cannot determine data directory: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Journal entries need some text.
    #[error("journal entry content is empty")]
    EmptyContent,

    /// Symptom outside the fixed vocabulary.
    #[error("unknown symptom: {0}")]
    UnknownSymptom(String),

    /// Mood outside the fixed set.
    #[error("unknown mood: {0}")]
    UnknownMood(String),

    /// No entry with this id in the loaded snapshot.
    #[error("no journal entry with id {0}")]
    UnknownEntry(String),

    /// The recovery start date lies after the current time.
    #[error("start instant {start} is in the future")]
    StartInFuture { start: chrono::DateTime<chrono::Utc> },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
