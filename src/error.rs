//! Error types for doccache
//!
//! All modules use `CacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for doccache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// All errors that can occur in doccache
#[derive(Error, Debug)]
pub enum CacheError {
    // Store errors
    #[error("Failed to open storage directory {path}: {source}")]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage directory {path} is full ({max_files} blobs)")]
    StoreFull { path: PathBuf, max_files: usize },

    #[error("Failed to save blob {name}: {source}")]
    Save {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    #[error("Corrupt blob {name}: {reason}")]
    CorruptBlob { name: String, reason: String },

    #[error("Failed to map blob {name}: {source}")]
    Map {
        name: String,
        #[source]
        source: std::io::Error,
    },

    // Entry errors
    #[error("Entry {name} is not mapped and its cache has been closed")]
    Orphaned { name: String },

    #[error("Invalid label {key:?}: {reason}")]
    InvalidLabel { key: String, reason: String },

    #[error("No document labelled {key}={value}")]
    NotFound { key: String, value: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid label error
    pub fn invalid_label(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLabel {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::StoreFull { .. } => Some("Raise cache.max_entries or remove unused documents"),
            Self::InvalidLabel { .. } => {
                Some("Label keys must be non-empty without whitespace; values must be one line")
            }
            Self::ConfigInvalid { .. } => Some("Run: doccache config show"),
            Self::NotFound { .. } => Some("Run: doccache list"),
            _ => None,
        }
    }
}
