//! # Savu Core Storage System Errors
//!
//! Defines error types specific to the storage layer.
//!
//! [`StorageSystemError`] covers file I/O, container tree navigation
//! (missing or pre-existing groups, fields of the wrong kind), container
//! (de)serialization and configuration parsing.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found at path: {0}")]
    FileNotFound(PathBuf),

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("Container group or field not found: '{path}'")]
    MissingNode { path: String },

    #[error("Container node already exists and overwrite is not permitted: '{path}'")]
    NodeExists { path: String },

    #[error("Container field '{path}' does not hold {expected}")]
    UnexpectedField { path: String, expected: String },

    #[error("Storage operation '{operation}' failed for path '{}': {message}", path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<unknown>".into()))]
    OperationFailed {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        StorageSystemError::MissingNode { path: path.into() }
    }
}
