//! # Savu Core Kernel Errors
//!
//! Defines the crate-wide error type.
//!
//! [`Error`] wraps the typed errors of each subsystem (plugin list, plugin
//! system, storage) so that operations crossing subsystem boundaries can use
//! a single [`Result`] alias and the `?` operator.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::plugin_list::error::PluginListError;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Error type shared by every Savu core operation
#[derive(Debug, ThisError)]
pub enum Error {
    /// Plugin list structure, encoding or index errors
    #[error("Plugin list error: {0}")]
    PluginList(#[from] PluginListError),

    /// Registry lookups and plugin registration
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Container, file and configuration errors
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Wrap an I/O error with the operation and path that produced it
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// True if this is one of the structural validation failures of a plugin list
    pub fn is_structure_error(&self) -> bool {
        matches!(
            self,
            Error::PluginList(PluginListError::NoLoader)
                | Error::PluginList(PluginListError::LoadersNotAtHead { .. })
        )
    }
}
