//! # Savu Core Plugin List Errors
//!
//! Defines error types specific to the plugin list manager.
//!
//! [`PluginListError`] covers structural validation of the list (loader
//! placement), index and position bookkeeping, and decoding of stored
//! plugin entries, including the compact list encoding of parameters.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginListError {
    #[error("The first plugin in the plugin list must be a loader plugin.")]
    NoLoader,

    #[error("All loader plugins must be at the beginning of the plugin list (loaders found at {loader_indices:?})")]
    LoadersNotAtHead { loader_indices: Vec<usize> },

    #[error("Index {index} is out of range for a plugin list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Position '{position}' is already used by another step")]
    DuplicatePosition { position: String },

    #[error("Invalid step position '{text}': {reason}")]
    InvalidPosition { text: String, reason: String },

    #[error("Malformed list value for parameter '{parameter}' ('{text}'): {reason}")]
    MalformedListParameter {
        parameter: String,
        text: String,
        reason: String,
    },

    #[error("Plugin entry '{entry}' has an invalid '{field}' field: {message}")]
    InvalidEntry {
        entry: String,
        field: String,
        message: String,
    },
}

impl PluginListError {
    pub fn invalid_position(text: impl Into<String>, reason: impl Into<String>) -> Self {
        PluginListError::InvalidPosition {
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_entry(entry: &str, field: &str, message: impl Into<String>) -> Self {
        PluginListError::InvalidEntry {
            entry: entry.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}
