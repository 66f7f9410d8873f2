//! Built-in Savu plugin descriptors.
//!
//! Each plugin here describes its parameters, documentation and datasets;
//! none of them processes data. [`register_builtin`] adds every class to a
//! [`StaticPluginRegistry`].
use log::debug;

use savu_core::plugin_system::error::PluginSystemError;
use savu_core::plugin_system::StaticPluginRegistry;

pub mod corrections;
pub mod filters;
pub mod loaders;
pub mod savers;

pub use corrections::TimeseriesFieldCorrections;
pub use filters::DummyPtycho;
pub use loaders::NxtomoLoader;
pub use savers::Hdf5Saver;

/// Register every built-in plugin class
pub fn register_builtin(registry: &mut StaticPluginRegistry) -> Result<(), PluginSystemError> {
    registry.register::<NxtomoLoader>()?;
    registry.register::<TimeseriesFieldCorrections>()?;
    registry.register::<DummyPtycho>()?;
    registry.register::<Hdf5Saver>()?;
    debug!("Registered {} built-in plugin classes", registry.count());
    Ok(())
}

/// A registry holding only the built-in plugins
pub fn builtin_registry() -> Result<StaticPluginRegistry, PluginSystemError> {
    let mut registry = StaticPluginRegistry::new();
    register_builtin(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests;
