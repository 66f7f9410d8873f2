//! # Savu Core Storage
//!
//! File-backed persistence for plugin lists and framework configuration.
//!
//! - **[`container`]**: the hierarchical group/field [`Container`] that plugin
//!   lists and citations are written to.
//! - **[`provider`]** / **[`local`]**: the [`StorageProvider`] seam and its
//!   local filesystem implementation with atomic writes.
//! - **[`config`]**: [`FrameworkConfig`] loading in JSON, YAML or TOML.
//! - **[`error`]**: [`StorageSystemError`](error::StorageSystemError).
pub mod provider;
pub mod local;
pub mod container;
pub mod config;
pub mod error;

/// Re-export key types
pub use provider::StorageProvider;
pub use local::LocalStorageProvider;
pub use container::{Container, Field, Group};
pub use config::{ConfigFormat, FrameworkConfig};

// Test module declaration
#[cfg(test)]
mod tests;
