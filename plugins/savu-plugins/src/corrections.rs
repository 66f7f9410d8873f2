use serde_json::json;

use savu_core::plugin_system::traits::{ParameterDefinition, Parameters, Plugin, PluginDocumentation};

#[derive(Debug, Default)]
pub struct TimeseriesFieldCorrections {
    parameters: Parameters,
}

impl Plugin for TimeseriesFieldCorrections {
    fn id(&self) -> &'static str {
        "savu.plugins.corrections.timeseries_field_corrections"
    }

    fn name(&self) -> &'static str {
        "TimeseriesFieldCorrections"
    }

    fn parameter_definitions(&self) -> Vec<ParameterDefinition> {
        vec![
            ParameterDefinition::user("in_datasets", json!(["tomo"]), "Raw timeseries data to correct."),
            ParameterDefinition::user("out_datasets", json!(["tomo"]), "Corrected projection data."),
        ]
    }

    fn documentation(&self) -> PluginDocumentation {
        PluginDocumentation {
            synopsis: "A Plugin to apply a simple dark and flatfield correction to some raw timeseries data"
                .to_string(),
            info: "The average dark and flat frames are taken from the frames the image key marks as 2 and 1."
                .to_string(),
            warn: String::new(),
        }
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}
