use crate::plugin_list::PluginList;
use crate::plugin_system::traits::{Plugin, PluginDataset};

/// Datasets read and written by one planned processing step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFlow {
    pub in_datasets: Vec<PluginDataset>,
    pub out_datasets: Vec<PluginDataset>,
}

impl PluginList {
    /// Record the datasets of a plugin instance as planned by the execution engine.
    ///
    /// Every recorded pattern carries the plugin's maximum frame batch size.
    pub fn record_dataset_flow(&mut self, plugin: &dyn Plugin) {
        let (in_datasets, out_datasets) = plugin.get_plugin_datasets();
        let max_frames = plugin.get_max_frames();
        let with_frames = |datasets: Vec<PluginDataset>| -> Vec<PluginDataset> {
            datasets
                .into_iter()
                .map(|mut d| {
                    d.pattern.max_frames = Some(max_frames);
                    d
                })
                .collect()
        };
        self.datasets.push(DatasetFlow {
            in_datasets: with_frames(in_datasets),
            out_datasets: with_frames(out_datasets),
        });
    }

    /// Everything recorded since the last reset, in recording order
    pub fn recorded_dataset_flow(&self) -> &[DatasetFlow] {
        &self.datasets
    }

    /// Forget all recorded dataset flow
    pub fn reset_dataset_flow(&mut self) {
        self.datasets.clear();
    }

    /// Output dataset names of every processing (non-loader) step, in list order
    pub fn dataset_flow(&self) -> Vec<Vec<String>> {
        self.steps
            .iter()
            .skip(self.n_loaders())
            .map(|step| step.out_datasets())
            .collect()
    }
}
