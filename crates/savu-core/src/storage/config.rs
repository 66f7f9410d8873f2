use std::path::Path;

use serde::{Deserialize, Serialize};
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::citation::{default_framework_citations, CitationRecord};
use crate::kernel::constants::{DEFAULT_RENDER_WIDTH, DEFAULT_SAVER_ID};
use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::StorageProvider;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

fn default_saver_id() -> String {
    DEFAULT_SAVER_ID.to_string()
}

fn default_render_width() -> usize {
    DEFAULT_RENDER_WIDTH
}

/// Framework-level settings used when plugin lists are completed, rendered and saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkConfig {
    /// Plugin id instantiated for synthesized saver steps
    #[serde(default = "default_saver_id")]
    pub default_saver_id: String,
    /// Column width of rendered plugin lists
    #[serde(default = "default_render_width")]
    pub render_width: usize,
    /// Decorate rendered output with ANSI colours
    #[serde(default)]
    pub colour: bool,
    /// Citations written under `entry/framework_citations` on every save
    #[serde(default = "default_framework_citations")]
    pub framework_citations: Vec<CitationRecord>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            default_saver_id: default_saver_id(),
            render_width: default_render_width(),
            colour: false,
            framework_citations: default_framework_citations(),
        }
    }
}

impl FrameworkConfig {
    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let to_error = |format: &str, e: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::SerializationError { format: format.to_string(), source: e }
        };
        let text = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self)
                .map_err(|e| to_error("json", Box::new(e)))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self)
                .map_err(|e| to_error("yaml", Box::new(e)))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self)
                .map_err(|e| to_error("toml", Box::new(e)))?,
        };
        Ok(text)
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let to_error = |format: &str, e: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::DeserializationError { format: format.to_string(), source: e }
        };
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| to_error("json", Box::new(e)))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| to_error("yaml", Box::new(e)))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| to_error("toml", Box::new(e)))?,
        };
        Ok(config)
    }

    /// Load configuration from disk, the format chosen by file extension
    pub fn load(provider: &dyn StorageProvider, path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
        })?;
        let content = provider.read_to_string(path)?;
        let config = Self::deserialize(&content, format)?;
        log::debug!("Loaded framework configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration if a path is given, otherwise use the defaults
    pub fn load_or_default(provider: &dyn StorageProvider, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(provider, path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to disk
    pub fn save(&self, provider: &dyn StorageProvider, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Json);
        let content = self.serialize(format)?;
        provider.write_string(path, &content)
    }
}
