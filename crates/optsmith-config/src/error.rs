//! Error types for option storage and store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`Storage`](crate::Storage) collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read a stored blob
    #[error("failed to read file '{path}': {source}")]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a stored blob
    #[error("failed to write file '{path}': {source}")]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the storage directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Storage key cannot be mapped to a location
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur during option store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The storage collaborator failed to load or save the options blob
    #[error("failed to persist options under '{key}': {source}")]
    Persistence {
        /// Storage key of the blob.
        key: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value does not fit its option's definition
    #[error("invalid value for option '{key}': {reason}")]
    InvalidValue {
        /// Option key.
        key: String,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// An option definition is malformed
    #[error("invalid definition for option '{key}': {reason}")]
    InvalidSchema {
        /// Option key.
        key: String,
        /// Description of why the definition was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Create a persistence error.
    pub fn persistence(key: impl Into<String>, source: StorageError) -> Self {
        ConfigError::Persistence {
            key: key.into(),
            source,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidSchema {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
