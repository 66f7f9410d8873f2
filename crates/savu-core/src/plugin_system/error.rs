//! # Savu Core Plugin System Errors
//!
//! Defines error types specific to the plugin registry.
//!
//! [`PluginSystemError`] is raised when a plugin id cannot be resolved,
//! when a plugin class is registered twice, or when a registered class
//! does not behave as its registration claimed.
#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin '{plugin_id}' is not known to the plugin registry")]
    PluginNotFound { plugin_id: String },

    #[error("Plugin '{plugin_id}' is already registered")]
    AlreadyRegistered { plugin_id: String },

    #[error("Plugin registration error for '{plugin_id}': {message}")]
    RegistrationError {
        plugin_id: String,
        message: String,
    },
}

impl PluginSystemError {
    pub fn not_found(plugin_id: &str) -> Self {
        PluginSystemError::PluginNotFound { plugin_id: plugin_id.to_string() }
    }
}
