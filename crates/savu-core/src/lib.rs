pub mod citation;
pub mod kernel;
pub mod plugin_list;
pub mod plugin_system;
pub mod storage;

// Re-export key public types/traits for easier use by the binary and plugins
pub use citation::CitationRecord;
pub use kernel::error::{Error, Result};
pub use plugin_list::{DisplayLevel, PluginList, PluginStep, Position, RenderOptions, Verbosity};
pub use plugin_system::{Capabilities, Capability, Plugin, PluginRegistry, StaticPluginRegistry};
pub use storage::{Container, FrameworkConfig, LocalStorageProvider, StorageProvider};

// Shared test fixtures and cross-module tests
#[cfg(test)]
mod tests;
