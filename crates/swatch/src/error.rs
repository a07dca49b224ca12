//! Error types for the swatch library.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Main error type for swatch operations.
///
/// Most of the engine recovers internally and returns a well-typed result
/// instead of an error. Only explicit user saves, configuration loading and
/// file I/O reach the caller through this type.
#[derive(Debug, Error)]
pub enum SwatchError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A storage write that the caller explicitly asked for failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A remote document could not be fetched.
    #[error("Fetch error for '{locator}': {message}")]
    Fetch { locator: String, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A candidate could not become an entry.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Requested entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An import could not be applied.
    #[error("Import error: {0}")]
    Import(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for swatch operations.
pub type Result<T> = std::result::Result<T, SwatchError>;
