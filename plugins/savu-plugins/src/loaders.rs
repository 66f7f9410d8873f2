use serde_json::json;

use savu_core::plugin_system::traits::{
    Capabilities, Capability, ParameterDefinition, Parameters, Plugin, PluginDocumentation,
};

/// Loads tomography data from an NXtomo file
#[derive(Debug, Default)]
pub struct NxtomoLoader {
    parameters: Parameters,
}

impl Plugin for NxtomoLoader {
    fn id(&self) -> &'static str {
        "savu.plugins.loaders.full_field_loaders.nxtomo_loader"
    }

    fn name(&self) -> &'static str {
        "NxtomoLoader"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::of(&[Capability::Loader])
    }

    fn parameter_definitions(&self) -> Vec<ParameterDefinition> {
        vec![
            ParameterDefinition::user("preview", json!([]), "A slice list of required frames."),
            ParameterDefinition::user("name", json!("tomo"), "A name assigned to the dataset."),
            ParameterDefinition::advanced("data_path", json!("entry1/tomo/data"), "Path to the data inside the file."),
            ParameterDefinition::advanced(
                "image_key_path",
                json!("entry1/tomo/instrument/detector/image_key"),
                "Path to the image key entry inside the nxs file.",
            ),
        ]
    }

    fn documentation(&self) -> PluginDocumentation {
        PluginDocumentation::synopsis("A class to load tomography data from a hdf5 file.")
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}
