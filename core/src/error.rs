//! Error types and handling for jumpsearch core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jumpsearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jumpsearch core
#[derive(Error, Debug)]
pub enum Error {
    /// The search term does not compile to a regular expression
    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// History persistence errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// The navigation surface could not open the match
    #[error("Failed to open {path}: {message}")]
    Navigation { path: PathBuf, message: String },

    /// The file enumerator failed for a whole scope
    #[error("Failed to list files under {root}: {message}")]
    Enumeration { root: PathBuf, message: String },

    /// The prompt surface failed (not a user dismissal)
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// History store errors
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to read history from {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write history to {path}: {message}")]
    Write { path: String, message: String },

    #[error("History file {path} is not valid: {message}")]
    Corrupt { path: String, message: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
