use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::kernel::constants::NX_CLASS;
use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::provider::StorageProvider;

/// Format tag written at the top of every container file
pub const CONTAINER_FORMAT: &str = "savu-container";

/// Current container file version
pub const CONTAINER_VERSION: u32 = 1;

/// A leaf value stored under a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Field {
    /// Text field, used for ids, names and JSON blobs
    Text(String),
    /// Boolean field
    Flag(bool),
}

impl Field {
    /// The text content, if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            Field::Flag(_) => None,
        }
    }

    /// Interpret the field as a boolean. Text fields holding the usual
    /// spellings of true/false are accepted as well.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Field::Flag(b) => Some(*b),
            Field::Text(s) => match s.trim() {
                "true" | "True" | "TRUE" | "1" => Some(true),
                "false" | "False" | "FALSE" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

/// A node of the hierarchical container: attributes, fields and child groups.
///
/// Children are kept sorted by name, which is also the order in which they
/// are visited when a container is read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, Field>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    groups: BTreeMap<String, Group>,
}

impl Group {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Tag the group with an `NX_class` attribute
    pub fn set_class(&mut self, class: &str) {
        self.set_attr(NX_CLASS, class);
    }

    /// The `NX_class` attribute, if set
    pub fn class(&self) -> Option<&str> {
        self.attr(NX_CLASS)
    }

    /// Create a new child group. Fails if a child of that name already exists.
    pub fn create_group(&mut self, name: &str) -> std::result::Result<&mut Group, StorageSystemError> {
        if self.groups.contains_key(name) || self.fields.contains_key(name) {
            return Err(StorageSystemError::NodeExists { path: name.to_string() });
        }
        Ok(self.groups.entry(name.to_string()).or_default())
    }

    /// Get a child group by name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Get a mutable child group by name
    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.get_mut(name)
    }

    /// Check whether a child group exists
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Iterate over child groups in stored order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a `/`-separated path of child groups
    pub fn resolve(&self, path: &str) -> Option<&Group> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |group, segment| group.group(segment))
    }

    /// Write a field. Fails if a node of that name already exists.
    pub fn write_field(&mut self, name: &str, field: Field) -> std::result::Result<(), StorageSystemError> {
        if self.fields.contains_key(name) || self.groups.contains_key(name) {
            return Err(StorageSystemError::NodeExists { path: name.to_string() });
        }
        self.fields.insert(name.to_string(), field);
        Ok(())
    }

    /// Write a text field
    pub fn write_text(&mut self, name: &str, value: impl Into<String>) -> std::result::Result<(), StorageSystemError> {
        self.write_field(name, Field::Text(value.into()))
    }

    /// Write a boolean field
    pub fn write_flag(&mut self, name: &str, value: bool) -> std::result::Result<(), StorageSystemError> {
        self.write_field(name, Field::Flag(value))
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Check whether a field exists
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a text field's content
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Field::as_text)
    }
}

/// On-disk envelope of a container
#[derive(Debug, Deserialize)]
struct ContainerFile {
    format: String,
    version: u32,
    root: Group,
}

#[derive(Debug, Serialize)]
struct ContainerFileRef<'a> {
    format: &'a str,
    version: u32,
    root: &'a Group,
}

/// A hierarchical group/field container that plugin lists are persisted to.
///
/// A `Container` is an open, in-memory session: it is read in full by
/// [`Container::open`] and only touches the filesystem again when
/// [`Container::write`] is called.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    root: Group,
}

impl Container {
    /// Create an empty in-memory container
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a container file through the given provider
    pub fn open(provider: &dyn StorageProvider, path: &Path) -> Result<Self> {
        log::debug!("Opening container {}", path.display());
        let text = provider.read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write the container to a file through the given provider
    pub fn write(&self, provider: &dyn StorageProvider, path: &Path) -> Result<()> {
        log::debug!("Writing container {}", path.display());
        let text = self.to_json()?;
        provider.write_string(path, &text)
    }

    /// Parse a container from its JSON file representation
    pub fn from_json(text: &str) -> Result<Self> {
        let file: ContainerFile = serde_json::from_str(text).map_err(|e| {
            StorageSystemError::DeserializationError {
                format: "json".to_string(),
                source: Box::new(e),
            }
        })?;
        if file.format != CONTAINER_FORMAT {
            return Err(StorageSystemError::UnexpectedField {
                path: "format".to_string(),
                expected: format!("'{}'", CONTAINER_FORMAT),
            }
            .into());
        }
        if file.version > CONTAINER_VERSION {
            return Err(StorageSystemError::OperationFailed {
                operation: "open".to_string(),
                path: None,
                message: format!("unsupported container version {}", file.version),
            }
            .into());
        }
        Ok(Self { root: file.root })
    }

    /// Serialize the container to its JSON file representation
    pub fn to_json(&self) -> Result<String> {
        let file = ContainerFileRef {
            format: CONTAINER_FORMAT,
            version: CONTAINER_VERSION,
            root: &self.root,
        };
        serde_json::to_string_pretty(&file).map_err(|e| {
            StorageSystemError::SerializationError {
                format: "json".to_string(),
                source: Box::new(e),
            }
            .into()
        })
    }

    /// The root group
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// The mutable root group
    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Resolve a group path, failing with the full path if any segment is missing
    pub fn group(&self, path: &str) -> Result<&Group> {
        self.root
            .resolve(path)
            .ok_or_else(|| StorageSystemError::missing(path).into())
    }
}
