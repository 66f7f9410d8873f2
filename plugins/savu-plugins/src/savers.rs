use serde_json::json;

use savu_core::kernel::constants::DEFAULT_SAVER_ID;
use savu_core::plugin_system::traits::{
    Capabilities, Capability, ParameterDefinition, Parameters, Plugin, PluginDocumentation,
};

/// Writes datasets to hdf5 files. This is the saver added for unsaved datasets.
#[derive(Debug, Default)]
pub struct Hdf5Saver {
    parameters: Parameters,
}

impl Plugin for Hdf5Saver {
    fn id(&self) -> &'static str {
        DEFAULT_SAVER_ID
    }

    fn name(&self) -> &'static str {
        "Hdf5Saver"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::of(&[Capability::Saver])
    }

    fn parameter_definitions(&self) -> Vec<ParameterDefinition> {
        vec![
            ParameterDefinition::user("in_datasets", json!([]), "A list of the datasets to save."),
            ParameterDefinition::hidden("out_datasets", json!([]), "Savers create no datasets."),
            ParameterDefinition::advanced("pattern", json!("optimum"), "Pattern used to write the data."),
        ]
    }

    fn documentation(&self) -> PluginDocumentation {
        PluginDocumentation::synopsis("A class to save tomography data to a hdf5 file.")
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}
