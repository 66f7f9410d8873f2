use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::citation::CitationRecord;
use crate::kernel::constants::POSITION_KEY_WIDTH;
use crate::plugin_list::error::PluginListError;
use crate::plugin_system::traits::{
    dataset_names, ParameterVisibility, Parameters, Plugin, IN_DATASETS, OUT_DATASETS,
};

/// Display position of a step: a number plus an optional disambiguating letter ("3", "3b").
///
/// Positions label steps for display and storage keys. The order of the
/// list itself decides execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    number: u32,
    letter: Option<char>,
}

impl Position {
    pub fn new(number: u32) -> Self {
        Self { number, letter: None }
    }

    pub fn with_letter(number: u32, letter: char) -> Self {
        Self { number, letter: Some(letter) }
    }

    /// Numeric part
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Trailing letter, if any
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// The same position moved by `offset`, keeping the letter
    pub fn shifted(&self, offset: u32) -> Result<Self, PluginListError> {
        let number = self.number.checked_add(offset).ok_or_else(|| {
            PluginListError::invalid_position(self.to_string(), format!("moving it by {} overflows", offset))
        })?;
        Ok(Self { number, letter: self.letter })
    }

    /// Whether this is the bare position `0` used by lists numbered from zero
    pub fn is_zero(&self) -> bool {
        self.number == 0 && self.letter.is_none()
    }

    /// Container key: zero-padded number followed by the letter, e.g. `0003b`
    pub fn key(&self) -> String {
        let letter = self.letter.map(String::from).unwrap_or_default();
        format!("{:0width$}{}", self.number, letter, width = POSITION_KEY_WIDTH)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter {
            Some(letter) => write!(f, "{}{}", self.number, letter),
            None => write!(f, "{}", self.number),
        }
    }
}

impl FromStr for Position {
    type Err = PluginListError;

    /// Accepts surrounding whitespace and leading zeros: "3", "0003b", "   3 "
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PluginListError::invalid_position(s, "expected digits followed by an optional lower-case letter");
        let trimmed = s.trim();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, rest) = trimmed.split_at(digits_end);
        let number = digits.parse::<u32>().map_err(|_| invalid())?;

        let mut rest_chars = rest.chars();
        let letter = match (rest_chars.next(), rest_chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_lowercase() => Some(c),
            _ => return Err(invalid()),
        };
        Ok(Self { number, letter })
    }
}

/// One entry of a plugin list
#[derive(Debug, Clone, PartialEq)]
pub struct PluginStep {
    pub position: Option<Position>,
    /// Fully-qualified plugin id, resolved through the plugin registry
    pub plugin_id: String,
    pub name: String,
    pub parameters: Parameters,
    pub parameter_descriptions: Option<BTreeMap<String, String>>,
    /// Stored active flag; `None` means active
    pub active: Option<bool>,
    /// Parameters shown at the "user" display level
    pub visible_parameter_names: Option<BTreeSet<String>>,
    /// Parameters never shown
    pub hidden_parameter_names: Option<BTreeSet<String>>,
    pub citations: Vec<CitationRecord>,
}

impl PluginStep {
    /// A step with no parameters or metadata
    pub fn new(plugin_id: &str, name: &str) -> Self {
        Self {
            position: None,
            plugin_id: plugin_id.to_string(),
            name: name.to_string(),
            parameters: Parameters::new(),
            parameter_descriptions: None,
            active: None,
            visible_parameter_names: None,
            hidden_parameter_names: None,
            citations: Vec::new(),
        }
    }

    /// Build a step from a plugin instance, copying its current parameters,
    /// descriptions, display sets and citations.
    pub fn from_plugin(plugin: &dyn Plugin, position: Option<Position>) -> Self {
        let definitions = plugin.parameter_definitions();
        let names_with = |visibility: ParameterVisibility| -> BTreeSet<String> {
            definitions
                .iter()
                .filter(|d| d.visibility == visibility)
                .map(|d| d.name.clone())
                .collect()
        };
        let visible = names_with(ParameterVisibility::User);
        let hidden = names_with(ParameterVisibility::Hidden);

        Self {
            position,
            plugin_id: plugin.id().to_string(),
            name: plugin.name().to_string(),
            parameters: plugin.parameters().clone(),
            parameter_descriptions: Some(plugin.parameter_descriptions()),
            active: Some(true),
            visible_parameter_names: Some(visible),
            hidden_parameter_names: if hidden.is_empty() { None } else { Some(hidden) },
            citations: plugin.citations(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_parameter(mut self, name: &str, value: Value) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_description(mut self, name: &str, description: &str) -> Self {
        self.parameter_descriptions
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), description.to_string());
        self
    }

    pub fn with_visible<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible_parameter_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_hidden<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_parameter_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_citation(mut self, citation: CitationRecord) -> Self {
        self.citations.push(citation);
        self
    }

    /// Whether the step takes part in processing
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// Names listed in the `in_datasets` parameter
    pub fn in_datasets(&self) -> Vec<String> {
        dataset_names(&self.parameters, IN_DATASETS)
    }

    /// Names listed in the `out_datasets` parameter
    pub fn out_datasets(&self) -> Vec<String> {
        dataset_names(&self.parameters, OUT_DATASETS)
    }
}
