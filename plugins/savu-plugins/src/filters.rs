use serde_json::json;

use savu_core::citation::CitationRecord;
use savu_core::plugin_system::traits::{
    DataPattern, ParameterDefinition, Parameters, Plugin, PluginDocumentation,
};

/// Placeholder ptychography reconstruction with the datasets of the real one
#[derive(Debug, Default)]
pub struct DummyPtycho {
    parameters: Parameters,
}

impl Plugin for DummyPtycho {
    fn id(&self) -> &'static str {
        "savu.plugins.filters.ptychography.dummy_ptycho"
    }

    fn name(&self) -> &'static str {
        "DummyPtycho"
    }

    fn parameter_definitions(&self) -> Vec<ParameterDefinition> {
        vec![
            ParameterDefinition::user("in_datasets", json!([]), "Diffraction data to reconstruct."),
            ParameterDefinition::user(
                "out_datasets",
                json!(["probe", "object_transmission", "positions"]),
                "Reconstructed probe, object and scan positions.",
            ),
        ]
    }

    fn documentation(&self) -> PluginDocumentation {
        PluginDocumentation {
            synopsis: "This plugin performs ptychography using the ptypy package".to_string(),
            info: String::new(),
            warn: "The object transmission is random noise; use it only to test pipelines.".to_string(),
        }
    }

    fn citations(&self) -> Vec<CitationRecord> {
        vec![CitationRecord::named("ptypy")
            .with_description("The ptychography reconstructions are based on the ptypy framework.")
            .with_doi("10.1098/rspa.2016.0640")]
    }

    fn data_pattern(&self) -> DataPattern {
        DataPattern::new("4D_SCAN", &[2, 3], &[0, 1])
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}
