//! # Savu Core Plugin System
//!
//! The seam between the plugin list manager and the plugins themselves.
//!
//! - **[`traits`]**: the [`Plugin`] trait, capability tags
//!   ([`Capability`], [`Capabilities`]), parameter declarations and
//!   documentation metadata.
//! - **[`registry`]**: the [`PluginRegistry`] lookup trait and the in-memory
//!   [`StaticPluginRegistry`] implementation.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
//!
//! Capabilities are explicit tags declared by each plugin class, so
//! classifying a step as loader, saver or GPU user is a set lookup.
pub mod registry;
pub mod traits;
pub mod error;

pub use registry::{PluginClass, PluginRegistry, StaticPluginRegistry};
pub use traits::{
    Capabilities, Capability, DataPattern, ParameterDefinition, ParameterVisibility, Parameters,
    Plugin, PluginDataset, PluginDocumentation,
};
// Test module declaration
#[cfg(test)]
mod tests;
