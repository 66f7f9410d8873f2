//! # Savu Core Plugin List
//!
//! The plugin list manager: an ordered sequence of [`PluginStep`]s with
//! structural validation, loader/saver classification, saver synthesis,
//! persistence to a [`Container`](crate::storage::Container) and text
//! rendering.
//!
//! ## Key Submodules:
//!
//! - **[`step`]**: [`PluginStep`] and its display [`Position`].
//! - **[`params`]**: the compact `[a,b];[c,d]` encoding of nested list parameters.
//! - **[`serialization`]**: loading from and saving to containers.
//! - **[`render`]**: text summaries at four verbosity levels.
//! - **[`dataset_flow`]**: per-step dataset bookkeeping for execution planning.
//! - **[`error`]**: [`PluginListError`](error::PluginListError).
//!
//! Loader and saver indices are derived state. They are recomputed from the
//! registry's capability tags after every mutation, and a mutation whose
//! recomputation fails is rolled back.
pub mod step;
pub mod params;
pub mod serialization;
pub mod render;
pub mod dataset_flow;
pub mod error;

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info};
use serde_json::Value;

use crate::citation::{default_framework_citations, CitationRecord};
use crate::kernel::error::Result;
use crate::plugin_list::error::PluginListError;
use crate::plugin_system::registry::PluginRegistry;
use crate::plugin_system::traits::IN_DATASETS;
use crate::storage::{LocalStorageProvider, StorageProvider};

pub use dataset_flow::DatasetFlow;
pub use render::{AnsiDecorator, DisplayLevel, PlainDecorator, RenderOptions, TextDecorator, TextStyle, Verbosity};
pub use step::{PluginStep, Position};

/// Loader and saver indices of a list, in list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepIndex {
    pub loaders: Vec<usize>,
    pub savers: Vec<usize>,
}

impl StepIndex {
    pub fn n_loaders(&self) -> usize {
        self.loaders.len()
    }

    pub fn n_savers(&self) -> usize {
        self.savers.len()
    }
}

/// Classify every step through the registry.
///
/// Any unresolvable plugin id fails the whole classification.
pub fn classify(registry: &dyn PluginRegistry, steps: &[PluginStep]) -> Result<StepIndex> {
    let mut index = StepIndex::default();
    for (i, step) in steps.iter().enumerate() {
        let capabilities = registry.capabilities(&step.plugin_id)?;
        if capabilities.is_loader() {
            index.loaders.push(i);
        }
        if capabilities.is_saver() {
            index.savers.push(i);
        }
    }
    Ok(index)
}

fn next_position_number(number: u32) -> Result<u32> {
    number
        .checked_add(1)
        .ok_or_else(|| PluginListError::invalid_position(number.to_string(), "no position follows it").into())
}

/// Ordered list of plugin steps and its derived classification
pub struct PluginList {
    registry: Arc<dyn PluginRegistry>,
    storage: Arc<dyn StorageProvider>,
    steps: Vec<PluginStep>,
    index: StepIndex,
    datasets: Vec<DatasetFlow>,
    framework_citations: Vec<CitationRecord>,
}

impl PluginList {
    /// Create an empty list resolving plugin ids through `registry`
    pub fn new(registry: Arc<dyn PluginRegistry>) -> Self {
        Self {
            registry,
            storage: Arc::new(LocalStorageProvider::current_dir()),
            steps: Vec::new(),
            index: StepIndex::default(),
            datasets: Vec::new(),
            framework_citations: default_framework_citations(),
        }
    }

    /// Use a different storage provider for path-based load and save
    pub fn with_storage(mut self, storage: Arc<dyn StorageProvider>) -> Self {
        self.storage = storage;
        self
    }

    /// Replace the framework citations written on save
    pub fn with_framework_citations(mut self, citations: Vec<CitationRecord>) -> Self {
        self.framework_citations = citations;
        self
    }

    pub fn registry(&self) -> &Arc<dyn PluginRegistry> {
        &self.registry
    }

    pub fn framework_citations(&self) -> &[CitationRecord] {
        &self.framework_citations
    }

    pub fn steps(&self) -> &[PluginStep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&PluginStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn n_loaders(&self) -> usize {
        self.index.n_loaders()
    }

    pub fn n_savers(&self) -> usize {
        self.index.n_savers()
    }

    pub fn loader_indices(&self) -> &[usize] {
        &self.index.loaders
    }

    pub fn saver_indices(&self) -> &[usize] {
        &self.index.savers
    }

    /// Number of steps after the loaders
    pub fn n_processing_plugins(&self) -> usize {
        self.len() - self.n_loaders()
    }

    /// Recompute the classification of the current steps without storing it
    pub fn classify(&self) -> Result<StepIndex> {
        classify(self.registry.as_ref(), &self.steps)
    }

    fn check_unique_position(&self, step: &PluginStep) -> Result<()> {
        if let Some(position) = step.position {
            if self.steps.iter().any(|s| s.position == Some(position)) {
                return Err(PluginListError::DuplicatePosition { position: position.to_string() }.into());
            }
        }
        Ok(())
    }

    /// Insert a step at `index`, shifting later steps back
    pub fn insert(&mut self, index: usize, step: PluginStep) -> Result<()> {
        if index > self.steps.len() {
            return Err(PluginListError::IndexOutOfRange { index, len: self.steps.len() }.into());
        }
        self.check_unique_position(&step)?;
        self.steps.insert(index, step);
        match self.classify() {
            Ok(derived) => {
                self.index = derived;
                debug!("Inserted step at index {} ({} steps)", index, self.steps.len());
                Ok(())
            }
            Err(e) => {
                self.steps.remove(index);
                Err(e)
            }
        }
    }

    /// Append a step at the end of the list
    pub fn push(&mut self, step: PluginStep) -> Result<()> {
        self.insert(self.steps.len(), step)
    }

    /// Remove and return the step at `index`
    pub fn remove(&mut self, index: usize) -> Result<PluginStep> {
        if index >= self.steps.len() {
            return Err(PluginListError::IndexOutOfRange { index, len: self.steps.len() }.into());
        }
        let removed = self.steps.remove(index);
        match self.classify() {
            Ok(derived) => {
                self.index = derived;
                debug!("Removed step '{}' from index {}", removed.name, index);
                Ok(removed)
            }
            Err(e) => {
                self.steps.insert(index, removed);
                Err(e)
            }
        }
    }

    /// Replace every step at once, as done when a list is loaded
    pub fn replace_steps(&mut self, steps: Vec<PluginStep>) -> Result<()> {
        let mut seen = BTreeSet::new();
        for position in steps.iter().filter_map(|s| s.position) {
            if !seen.insert(position.key()) {
                return Err(PluginListError::DuplicatePosition { position: position.to_string() }.into());
            }
        }
        let derived = classify(self.registry.as_ref(), &steps)?;
        self.steps = steps;
        self.index = derived;
        Ok(())
    }

    /// Remove every step
    pub fn clear(&mut self) {
        self.steps.clear();
        self.index = StepIndex::default();
    }

    /// Check that the list starts with one or more loaders and has no loaders after them
    pub fn validate_structure(&self) -> Result<()> {
        let loaders = &self.index.loaders;
        if loaders.is_empty() {
            return Err(PluginListError::NoLoader.into());
        }
        let contiguous_head = loaders.iter().enumerate().all(|(expected, &actual)| expected == actual);
        if !contiguous_head {
            return Err(PluginListError::LoadersNotAtHead { loader_indices: loaders.clone() }.into());
        }
        Ok(())
    }

    /// Dataset names already consumed by saver steps
    fn saved_datasets(&self) -> BTreeSet<String> {
        self.index
            .savers
            .iter()
            .flat_map(|&i| self.steps[i].in_datasets())
            .collect()
    }

    /// Append a default saver step for every required dataset no saver consumes yet.
    ///
    /// Savers are numbered after the last step, skipping numbers already in use.
    /// The list only changes if every saver could be added.
    /// Returns the dataset names that received a new saver, in request order.
    pub fn synthesize_missing_savers<S: AsRef<str>>(&mut self, required: &[S]) -> Result<Vec<String>> {
        let saved = self.saved_datasets();
        let mut missing: Vec<String> = Vec::new();
        for name in required.iter().map(AsRef::as_ref) {
            if !saved.contains(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
        if missing.is_empty() {
            return Ok(missing);
        }

        let mut taken: BTreeSet<u32> = self.steps.iter().filter_map(|s| s.position).map(|p| p.number()).collect();
        let mut next_number = match self.steps.last() {
            Some(last) => match last.position {
                Some(position) => next_position_number(position.number())?,
                None => u32::try_from(self.steps.len())
                    .ok()
                    .and_then(|len| len.checked_add(1))
                    .ok_or_else(|| PluginListError::invalid_position(self.steps.len().to_string(), "too many steps to number"))?,
            },
            None => 1,
        };

        let saver_id = self.registry.default_saver_id().to_string();
        let mut steps = self.steps.clone();
        for name in &missing {
            while taken.contains(&next_number) {
                next_number = next_position_number(next_number)?;
            }
            taken.insert(next_number);

            let mut plugin = self.registry.instantiate(&saver_id)?;
            plugin.populate_default_parameters();
            plugin
                .parameters_mut()
                .insert(IN_DATASETS.to_string(), Value::Array(vec![Value::String(name.clone())]));
            let step = PluginStep::from_plugin(plugin.as_ref(), Some(Position::new(next_number)));
            info!("Adding {} at position {} to save dataset '{}'", step.name, next_number, name);
            steps.push(step);
        }

        self.replace_steps(steps)?;
        Ok(missing)
    }

    /// Whether any step's plugin class runs on a GPU
    pub fn has_gpu_steps(&self) -> Result<bool> {
        for step in &self.steps {
            if self.registry.capabilities(&step.plugin_id)?.uses_gpu() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl std::fmt::Debug for PluginList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginList")
            .field("steps", &self.steps.iter().map(|s| s.plugin_id.as_str()).collect::<Vec<_>>())
            .field("index", &self.index)
            .finish()
    }
}
