use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::kernel::constants::DEFAULT_SAVER_ID;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::{Capabilities, Plugin};

type PluginFactory = Arc<dyn Fn() -> Box<dyn Plugin> + Send + Sync>;

/// A registered plugin class: identity, capability tags and a constructor
#[derive(Clone)]
pub struct PluginClass {
    id: String,
    name: String,
    capabilities: Capabilities,
    factory: PluginFactory,
}

impl PluginClass {
    /// Describe a class by instantiating it once through its factory
    pub fn from_factory(factory: PluginFactory) -> Self {
        let sample = factory();
        Self {
            id: sample.id().to_string(),
            name: sample.name().to_string(),
            capabilities: sample.capabilities(),
            factory,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Create a fresh plugin instance with its parameters unpopulated
    pub fn instantiate(&self) -> Box<dyn Plugin> {
        (self.factory)()
    }
}

impl fmt::Debug for PluginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginClass")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Lookup service mapping plugin ids to plugin classes.
///
/// The plugin list manager receives an implementation at construction and
/// never consults any process-wide registry.
pub trait PluginRegistry: Send + Sync + fmt::Debug {
    /// Resolve a plugin id to its class
    fn resolve(&self, plugin_id: &str) -> Result<&PluginClass, PluginSystemError>;

    /// Id of the plugin used for synthesized saver steps
    fn default_saver_id(&self) -> &str;

    /// Ids of every known plugin, sorted
    fn plugin_ids(&self) -> Vec<String>;

    /// Create a plugin instance for the given id
    fn instantiate(&self, plugin_id: &str) -> Result<Box<dyn Plugin>, PluginSystemError> {
        Ok(self.resolve(plugin_id)?.instantiate())
    }

    /// Capability tags of the given plugin id
    fn capabilities(&self, plugin_id: &str) -> Result<Capabilities, PluginSystemError> {
        Ok(self.resolve(plugin_id)?.capabilities().clone())
    }
}

/// Registry of statically registered plugin classes
pub struct StaticPluginRegistry {
    /// Registered classes by plugin id
    classes: HashMap<String, PluginClass>,
    default_saver_id: String,
}

impl StaticPluginRegistry {
    /// Create an empty registry using the standard default saver
    pub fn new() -> Self {
        Self::with_default_saver(DEFAULT_SAVER_ID)
    }

    /// Create an empty registry with a specific default saver id
    pub fn with_default_saver(default_saver_id: &str) -> Self {
        Self {
            classes: HashMap::new(),
            default_saver_id: default_saver_id.to_string(),
        }
    }

    /// Register a plugin type constructible through `Default`
    pub fn register<P: Plugin + Default + 'static>(&mut self) -> Result<(), PluginSystemError> {
        self.register_factory(|| Box::new(P::default()))
    }

    /// Register a plugin class from a constructor
    pub fn register_factory<F>(&mut self, factory: F) -> Result<(), PluginSystemError>
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        let class = PluginClass::from_factory(Arc::new(factory));
        let id = class.id().to_string();
        if id.is_empty() {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: class.name().to_string(),
                message: "plugin id must not be empty".to_string(),
            });
        }
        if self.classes.contains_key(&id) {
            return Err(PluginSystemError::AlreadyRegistered { plugin_id: id });
        }
        debug!("Registered plugin class {} ({})", class.name(), id);
        self.classes.insert(id, class);
        Ok(())
    }

    /// Remove a plugin class by id
    pub fn unregister(&mut self, plugin_id: &str) -> Result<PluginClass, PluginSystemError> {
        self.classes
            .remove(plugin_id)
            .ok_or_else(|| PluginSystemError::not_found(plugin_id))
    }

    /// Check if a plugin id is registered
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.classes.contains_key(plugin_id)
    }

    /// Get the number of registered classes
    pub fn count(&self) -> usize {
        self.classes.len()
    }
}

impl Default for StaticPluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StaticPluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.classes.keys().collect();
        ids.sort();
        f.debug_struct("StaticPluginRegistry")
            .field("classes", &ids)
            .field("default_saver_id", &self.default_saver_id)
            .finish()
    }
}

impl PluginRegistry for StaticPluginRegistry {
    fn resolve(&self, plugin_id: &str) -> Result<&PluginClass, PluginSystemError> {
        self.classes
            .get(plugin_id)
            .ok_or_else(|| PluginSystemError::not_found(plugin_id))
    }

    fn default_saver_id(&self) -> &str {
        &self.default_saver_id
    }

    fn plugin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.classes.keys().cloned().collect();
        ids.sort();
        ids
    }
}
