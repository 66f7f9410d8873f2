use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value;

use crate::kernel::constants::{ENTRY_GROUP, FRAMEWORK_CITATIONS_GROUP, PLUGIN_GROUP, POSITION_KEY_WIDTH};
use crate::kernel::error::Result;
use crate::plugin_list::error::PluginListError;
use crate::plugin_list::params::{decode_parameters, encode_parameters};
use crate::plugin_list::step::{PluginStep, Position};
use crate::plugin_list::PluginList;
use crate::plugin_system::traits::Parameters;
use crate::storage::container::{Container, Group};
use crate::storage::error::StorageSystemError;

pub const NX_ENTRY: &str = "NXentry";
pub const NX_COLLECTION: &str = "NXcollection";
pub const NX_PROCESS: &str = "NXprocess";
pub const NX_NOTE: &str = "NXnote";

const FIELD_ID: &str = "id";
const FIELD_NAME: &str = "name";
const FIELD_DATA: &str = "data";
const FIELD_ACTIVE: &str = "active";
const FIELD_DESC: &str = "desc";
const FIELD_HIDE: &str = "hide";
const FIELD_USER: &str = "user";

fn plugin_group_path() -> String {
    format!("{}/{}", ENTRY_GROUP, PLUGIN_GROUP)
}

fn required_text<'a>(group: &'a Group, key: &str, field: &str) -> Result<&'a str> {
    group.text(field).ok_or_else(|| {
        StorageSystemError::missing(format!("{}/{}/{}", plugin_group_path(), key, field)).into()
    })
}

fn parse_json(key: &str, field: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| PluginListError::invalid_entry(key, field, e.to_string()).into())
}

fn parse_object(key: &str, field: &str, text: &str) -> Result<Parameters> {
    match parse_json(key, field, text)? {
        Value::Object(map) => Ok(map),
        other => Err(PluginListError::invalid_entry(key, field, format!("expected a JSON object, found {}", other)).into()),
    }
}

fn parse_descriptions(key: &str, text: &str) -> Result<BTreeMap<String, String>> {
    Ok(parse_object(key, FIELD_DESC, text)?
        .into_iter()
        .map(|(name, value)| {
            let description = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, description)
        })
        .collect())
}

fn parse_name_set(key: &str, field: &str, text: &str) -> Result<BTreeSet<String>> {
    match parse_json(key, field, text)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(PluginListError::invalid_entry(key, field, format!("expected parameter names, found {}", other)).into()),
            })
            .collect(),
        other => Err(PluginListError::invalid_entry(key, field, format!("expected a JSON array, found {}", other)).into()),
    }
}

fn read_step(key: &str, group: &Group, position: Position, active: Option<bool>) -> Result<PluginStep> {
    let mut step = PluginStep::new(
        required_text(group, key, FIELD_ID)?,
        required_text(group, key, FIELD_NAME)?,
    );
    step.position = Some(position);
    step.active = active;

    let mut parameters = parse_object(key, FIELD_DATA, required_text(group, key, FIELD_DATA)?)?;
    decode_parameters(&mut parameters)?;
    step.parameters = parameters;

    if let Some(text) = group.text(FIELD_DESC) {
        step.parameter_descriptions = Some(parse_descriptions(key, text)?);
    }
    if let Some(text) = group.text(FIELD_HIDE) {
        step.hidden_parameter_names = Some(parse_name_set(key, FIELD_HIDE, text)?);
    }
    if let Some(text) = group.text(FIELD_USER) {
        step.visible_parameter_names = Some(parse_name_set(key, FIELD_USER, text)?);
    }
    Ok(step)
}

fn to_json_text(key: &str, field: &str, value: &impl serde::Serialize) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| PluginListError::invalid_entry(key, field, e.to_string()).into())
}

fn write_step(key: &str, group: &mut Group, step: &PluginStep) -> Result<()> {
    group.set_class(NX_NOTE);
    group.write_text(FIELD_ID, step.plugin_id.as_str())?;
    group.write_text(FIELD_NAME, step.name.as_str())?;
    let data = encode_parameters(&step.parameters)?;
    group.write_text(FIELD_DATA, to_json_text(key, FIELD_DATA, &data)?)?;

    if let Some(active) = step.active {
        group.write_flag(FIELD_ACTIVE, active)?;
    }
    if let Some(desc) = &step.parameter_descriptions {
        group.write_text(FIELD_DESC, to_json_text(key, FIELD_DESC, desc)?)?;
    }
    if let Some(hide) = &step.hidden_parameter_names {
        group.write_text(FIELD_HIDE, to_json_text(key, FIELD_HIDE, hide)?)?;
    }
    if let Some(user) = &step.visible_parameter_names {
        group.write_text(FIELD_USER, to_json_text(key, FIELD_USER, user)?)?;
    }
    for citation in &step.citations {
        citation.export_into(group)?;
    }
    Ok(())
}

impl PluginList {
    /// Load the list from a container file, replacing the current steps.
    ///
    /// With `activation_filter` set, inactive entries are materialized too
    /// (for listing); their stored flag is kept on the step.
    pub fn load(&mut self, path: &Path, activation_filter: bool) -> Result<()> {
        let container = Container::open(self.storage.as_ref(), path)?;
        self.load_from(&container, activation_filter)?;
        info!("Loaded {} plugin steps from {}", self.len(), path.display());
        Ok(())
    }

    /// Load the list from an open container, replacing the current steps
    pub fn load_from(&mut self, container: &Container, activation_filter: bool) -> Result<()> {
        let plugins = container.group(&plugin_group_path())?;

        let mut steps = Vec::new();
        let mut first_materialized = true;
        let mut shift = 0;
        for (key, group) in plugins.groups() {
            let stored_active = match group.field(FIELD_ACTIVE) {
                Some(field) => Some(field.as_flag().ok_or_else(|| {
                    PluginListError::invalid_entry(key, FIELD_ACTIVE, "expected a boolean")
                })?),
                None => None,
            };
            if !(activation_filter || stored_active.unwrap_or(true)) {
                debug!("Skipping inactive plugin entry {}", key);
                continue;
            }

            let mut position: Position = key.parse()?;
            // Old lists numbered their steps from 0
            if first_materialized {
                first_materialized = false;
                if position.is_zero() {
                    warn!("Plugin list positions start at 0; renumbering from 1");
                    shift = 1;
                }
            }
            position = position.shifted(shift)?;

            let step = read_step(key, group, position, stored_active)?;
            debug!("Read plugin entry {} as step {} ({})", key, position, step.plugin_id);
            steps.push(step);
        }

        self.replace_steps(steps)
    }

    /// Save the list to a new container file, replacing any existing file.
    ///
    /// Nothing is written unless the whole container was built successfully.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut container = Container::new();
        self.save_to(&mut container)?;
        container.write(self.storage.as_ref(), path)?;
        info!("Saved {} plugin steps to {}", self.len(), path.display());
        Ok(())
    }

    /// Write the list into an open container. The container must not have an `entry` group yet.
    pub fn save_to(&self, container: &mut Container) -> Result<()> {
        let entry = container.root_mut().create_group(ENTRY_GROUP)?;
        entry.set_class(NX_ENTRY);

        let citations = entry.create_group(FRAMEWORK_CITATIONS_GROUP)?;
        citations.set_class(NX_COLLECTION);
        for citation in &self.framework_citations {
            citation.export_into(citations)?;
        }

        let plugins = entry.create_group(PLUGIN_GROUP)?;
        plugins.set_class(NX_PROCESS);
        for (count, step) in self.steps.iter().enumerate() {
            let key = match step.position {
                Some(position) => position.key(),
                None => format!("{:0width$}", count + 1, width = POSITION_KEY_WIDTH),
            };
            let group = plugins.create_group(&key)?;
            write_step(&key, group, step)?;
        }
        Ok(())
    }
}
