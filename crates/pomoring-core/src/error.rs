//! Core error types for pomoring-core.
//!
//! Nothing in this crate is fatal to the timer: persistence errors are
//! reported as warnings and the caller keeps working from memory.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of the underlying key-value storage.
///
/// Always non-fatal: the in-memory settings stay authoritative.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The SQLite backend rejected a read or write
    #[error("storage backend failed: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Settings could not be encoded as JSON
    #[error("failed to encode settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The data directory could not be prepared
    #[error("storage IO failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused the write (quota, read-only, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Application config errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the config tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Rejected identifiers coming from the edges (CLI, stored strings).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown mode '{0}' (expected pomodoro, shortBreak or longBreak)")]
    UnknownMode(String),

    #[error("unknown font '{0}'")]
    UnknownFont(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}
