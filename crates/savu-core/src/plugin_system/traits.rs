use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

use crate::citation::CitationRecord;

/// Parameter values of a plugin or plugin step, keyed by parameter name
pub type Parameters = serde_json::Map<String, Value>;

/// Parameter naming the datasets a plugin reads
pub const IN_DATASETS: &str = "in_datasets";

/// Parameter naming the datasets a plugin writes
pub const OUT_DATASETS: &str = "out_datasets";

/// Capability tags a plugin class can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Introduces a dataset into the pipeline
    Loader,
    /// Persists a dataset to an external sink
    Saver,
    /// Runs on a GPU
    Gpu,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Loader => write!(f, "loader"),
            Capability::Saver => write!(f, "saver"),
            Capability::Gpu => write!(f, "gpu"),
        }
    }
}

/// The fixed set of capability tags of a plugin class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    tags: BTreeSet<Capability>,
}

impl Capabilities {
    /// No capabilities: a plain processing plugin
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a set from a list of tags
    pub fn of(tags: &[Capability]) -> Self {
        Self { tags: tags.iter().copied().collect() }
    }

    /// Add a tag
    pub fn with(mut self, tag: Capability) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn contains(&self, tag: Capability) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_loader(&self) -> bool {
        self.contains(Capability::Loader)
    }

    pub fn is_saver(&self) -> bool {
        self.contains(Capability::Saver)
    }

    pub fn uses_gpu(&self) -> bool {
        self.contains(Capability::Gpu)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.tags.iter().copied()
    }
}

/// Which display level a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterVisibility {
    /// Shown at the "user" level
    User,
    /// Shown only at levels above "user"
    Advanced,
    /// Never shown
    Hidden,
}

/// Declaration of a single plugin parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,
    pub default: Value,
    pub description: String,
    pub visibility: ParameterVisibility,
}

impl ParameterDefinition {
    /// A parameter shown at the user level
    pub fn user(name: &str, default: Value, description: &str) -> Self {
        Self {
            name: name.to_string(),
            default,
            description: description.to_string(),
            visibility: ParameterVisibility::User,
        }
    }

    /// A parameter shown only at the advanced level
    pub fn advanced(name: &str, default: Value, description: &str) -> Self {
        Self {
            visibility: ParameterVisibility::Advanced,
            ..Self::user(name, default, description)
        }
    }

    /// A parameter that is never displayed
    pub fn hidden(name: &str, default: Value, description: &str) -> Self {
        Self {
            visibility: ParameterVisibility::Hidden,
            ..Self::user(name, default, description)
        }
    }
}

/// Free-text documentation of a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginDocumentation {
    /// One paragraph summary
    pub synopsis: String,
    /// Additional information, shown at the very verbose level
    pub info: String,
    /// Warnings, shown at the very verbose level
    pub warn: String,
}

impl PluginDocumentation {
    pub fn synopsis(synopsis: &str) -> Self {
        Self {
            synopsis: synopsis.to_string(),
            ..Self::default()
        }
    }
}

/// Access pattern a plugin uses on a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPattern {
    /// Pattern name, e.g. "PROJECTION" or "SINOGRAM"
    pub name: String,
    pub core_dims: Vec<usize>,
    pub slice_dims: Vec<usize>,
    /// Maximum number of frames processed together, filled in when planned
    pub max_frames: Option<usize>,
}

impl DataPattern {
    pub fn new(name: &str, core_dims: &[usize], slice_dims: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            core_dims: core_dims.to_vec(),
            slice_dims: slice_dims.to_vec(),
            max_frames: None,
        }
    }

    /// Projection images of a (angle, y, x) tomography dataset
    pub fn projection() -> Self {
        Self::new("PROJECTION", &[1, 2], &[0])
    }

    /// Sinograms of a (angle, y, x) tomography dataset
    pub fn sinogram() -> Self {
        Self::new("SINOGRAM", &[0, 2], &[1])
    }
}

/// A named dataset a plugin reads or writes, with its access pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDataset {
    pub name: String,
    pub pattern: DataPattern,
}

/// Read a list-of-names parameter, accepting a single string as a one-element list
pub fn dataset_names(parameters: &Parameters, key: &str) -> Vec<String> {
    match parameters.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Core trait that all plugins must implement.
///
/// Only the configuration side of a plugin is described here: identity,
/// capabilities, parameters, documentation and the datasets it touches.
pub trait Plugin: Send + Sync {
    /// Fully-qualified plugin id, e.g. `savu.plugins.savers.hdf5_saver`
    fn id(&self) -> &'static str;

    /// Display name of the plugin
    fn name(&self) -> &'static str;

    /// Capability tags of the plugin class
    fn capabilities(&self) -> Capabilities {
        Capabilities::none()
    }

    /// Declared parameters with their defaults
    fn parameter_definitions(&self) -> Vec<ParameterDefinition>;

    /// Free-text documentation
    fn documentation(&self) -> PluginDocumentation;

    /// Current parameter values
    fn parameters(&self) -> &Parameters;

    /// Mutable access to the parameter values
    fn parameters_mut(&mut self) -> &mut Parameters;

    /// Reset every declared parameter to its default value
    fn populate_default_parameters(&mut self) {
        let definitions = self.parameter_definitions();
        let parameters = self.parameters_mut();
        for definition in definitions {
            parameters.insert(definition.name, definition.default);
        }
    }

    /// Parameter descriptions keyed by parameter name
    fn parameter_descriptions(&self) -> BTreeMap<String, String> {
        self.parameter_definitions()
            .into_iter()
            .map(|d| (d.name, d.description))
            .collect()
    }

    /// Citations to write alongside the plugin's step
    fn citations(&self) -> Vec<CitationRecord> {
        Vec::new()
    }

    /// Access pattern used for every dataset of this plugin
    fn data_pattern(&self) -> DataPattern {
        DataPattern::projection()
    }

    /// Input and output datasets, derived from the `in_datasets` and `out_datasets` parameters
    fn get_plugin_datasets(&self) -> (Vec<PluginDataset>, Vec<PluginDataset>) {
        let pattern = self.data_pattern();
        let to_datasets = |key: &str| -> Vec<PluginDataset> {
            dataset_names(self.parameters(), key)
                .into_iter()
                .map(|name| PluginDataset { name, pattern: pattern.clone() })
                .collect()
        };
        (to_datasets(IN_DATASETS), to_datasets(OUT_DATASETS))
    }

    /// Maximum number of frames the plugin processes in one batch
    fn get_max_frames(&self) -> usize {
        1
    }
}
