#![cfg(test)]

use std::sync::Arc;

use serde_json::{json, Value};

use crate::kernel::constants::DEFAULT_SAVER_ID;
use crate::plugin_list::{PluginList, PluginStep, Position};
use crate::plugin_system::registry::StaticPluginRegistry;
use crate::plugin_system::traits::{
    Capabilities, Capability, ParameterDefinition, Parameters, Plugin, PluginDocumentation,
};

pub const LOADER_ID: &str = "test.loaders.mock_loader";
pub const FILTER_ID: &str = "test.filters.mock_filter";
pub const GPU_FILTER_ID: &str = "test.filters.mock_gpu_filter";
pub const SAVER_ID: &str = DEFAULT_SAVER_ID;

// ===== MOCK PLUGINS =====

/// A configurable plugin used across the unit tests
pub struct MockPlugin {
    id: &'static str,
    name: &'static str,
    capabilities: Capabilities,
    definitions: fn() -> Vec<ParameterDefinition>,
    docs: PluginDocumentation,
    max_frames: usize,
    parameters: Parameters,
}

impl MockPlugin {
    pub fn loader() -> Self {
        Self {
            id: LOADER_ID,
            name: "MockLoader",
            capabilities: Capabilities::of(&[Capability::Loader]),
            definitions: || {
                vec![
                    ParameterDefinition::user("preview", json!([]), "A slice list of required frames."),
                    ParameterDefinition::advanced("data_path", json!("entry1/tomo"), "Path to the data inside the file."),
                ]
            },
            docs: PluginDocumentation::synopsis("Loads mock tomography data."),
            max_frames: 1,
            parameters: Parameters::new(),
        }
    }

    pub fn filter() -> Self {
        Self {
            id: FILTER_ID,
            name: "MockFilter",
            capabilities: Capabilities::none(),
            definitions: || {
                vec![
                    ParameterDefinition::user("in_datasets", json!([]), "Input dataset names."),
                    ParameterDefinition::user("out_datasets", json!(["tomo"]), "Output dataset names."),
                    ParameterDefinition::user("alpha", json!(1.5), "Scale factor applied to every frame before the correction is computed."),
                    ParameterDefinition::advanced("beta", json!(2), "Second order coefficient."),
                    ParameterDefinition::hidden("secret", json!("s"), "Never displayed."),
                ]
            },
            docs: PluginDocumentation {
                synopsis: "Applies a mock correction to every frame.".to_string(),
                info: "Extra information about the mock filter.".to_string(),
                warn: "Mock filters do not change the data.".to_string(),
            },
            max_frames: 8,
            parameters: Parameters::new(),
        }
    }

    pub fn gpu_filter() -> Self {
        Self {
            id: GPU_FILTER_ID,
            name: "MockGpuFilter",
            capabilities: Capabilities::of(&[Capability::Gpu]),
            docs: PluginDocumentation::synopsis("Runs a mock correction on a GPU."),
            ..Self::filter()
        }
    }

    pub fn saver() -> Self {
        Self {
            id: SAVER_ID,
            name: "Hdf5Saver",
            capabilities: Capabilities::of(&[Capability::Saver]),
            definitions: || {
                vec![
                    ParameterDefinition::user("in_datasets", json!([]), "Datasets to save."),
                    ParameterDefinition::hidden("out_datasets", json!([]), "Unused."),
                ]
            },
            docs: PluginDocumentation::synopsis("Saves datasets to a mock file."),
            max_frames: 1,
            parameters: Parameters::new(),
        }
    }
}

impl Plugin for MockPlugin {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities.clone()
    }

    fn parameter_definitions(&self) -> Vec<ParameterDefinition> {
        (self.definitions)()
    }

    fn documentation(&self) -> PluginDocumentation {
        self.docs.clone()
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    fn get_max_frames(&self) -> usize {
        self.max_frames
    }
}

// ===== FIXTURES =====

/// Registry with the loader, filter, GPU filter and saver mocks
pub fn mock_registry() -> StaticPluginRegistry {
    let mut registry = StaticPluginRegistry::new();
    registry.register_factory(|| Box::new(MockPlugin::loader())).unwrap();
    registry.register_factory(|| Box::new(MockPlugin::filter())).unwrap();
    registry.register_factory(|| Box::new(MockPlugin::gpu_filter())).unwrap();
    registry.register_factory(|| Box::new(MockPlugin::saver())).unwrap();
    registry
}

/// An empty list backed by [`mock_registry`]
pub fn empty_list() -> PluginList {
    PluginList::new(Arc::new(mock_registry()))
}

pub fn loader_step(position: u32) -> PluginStep {
    PluginStep::new(LOADER_ID, "MockLoader")
        .with_position(Position::new(position))
        .with_parameter("preview", json!([]))
        .with_visible(["preview"])
}

pub fn filter_step(position: u32, out: &[&str]) -> PluginStep {
    PluginStep::new(FILTER_ID, "MockFilter")
        .with_position(Position::new(position))
        .with_parameter("in_datasets", json!([]))
        .with_parameter("out_datasets", Value::from(out.to_vec()))
        .with_parameter("alpha", json!(1.5))
        .with_parameter("beta", json!(2))
        .with_parameter("secret", json!("s"))
        .with_description("alpha", "Scale factor.")
        .with_description("beta", "Second order coefficient.")
        .with_visible(["in_datasets", "out_datasets", "alpha"])
        .with_hidden(["secret"])
}

pub fn saver_step(position: u32, dataset: &str) -> PluginStep {
    PluginStep::new(SAVER_ID, "Hdf5Saver")
        .with_position(Position::new(position))
        .with_parameter("in_datasets", json!([dataset]))
}

/// loader, filter writing `tomo`, saver of `tomo`
pub fn standard_list() -> PluginList {
    let mut list = empty_list();
    list.push(loader_step(1)).unwrap();
    list.push(filter_step(2, &["tomo"])).unwrap();
    list.push(saver_step(3, "tomo")).unwrap();
    list
}
