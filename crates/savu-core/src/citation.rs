//! # Citation Records
//!
//! Attribution metadata for plugins and for the framework itself, written to
//! the structured container next to the plugin list.
use serde::{Deserialize, Serialize};

use crate::storage::container::Group;
use crate::storage::error::StorageSystemError;

/// Class attribute of a citation group
pub const NX_CITE: &str = "NXcite";

/// Attribution metadata for a plugin or for the framework.
///
/// Unset fields keep placeholder values so every exported citation group
/// has the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationRecord {
    /// Key of the citation group
    pub name: String,
    pub description: String,
    pub doi: String,
    pub endnote: String,
    pub bibtex: String,
}

impl Default for CitationRecord {
    fn default() -> Self {
        Self {
            name: "citation".to_string(),
            description: "Default Description".to_string(),
            doi: "Default DOI".to_string(),
            endnote: "Default Endnote".to_string(),
            bibtex: "Default Bibtex".to_string(),
        }
    }
}

impl CitationRecord {
    /// A record with the given name and placeholder content
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_doi(mut self, doi: &str) -> Self {
        self.doi = doi.to_string();
        self
    }

    pub fn with_endnote(mut self, endnote: &str) -> Self {
        self.endnote = endnote.to_string();
        self
    }

    pub fn with_bibtex(mut self, bibtex: &str) -> Self {
        self.bibtex = bibtex.to_string();
        self
    }

    /// Write the record's text fields into `group` and tag it as `NXcite`.
    pub fn export(&self, group: &mut Group) -> Result<(), StorageSystemError> {
        group.set_class(NX_CITE);
        group.write_text("description", self.description.as_str())?;
        group.write_text("doi", self.doi.as_str())?;
        group.write_text("endnote", self.endnote.as_str())?;
        group.write_text("bibtex", self.bibtex.as_str())?;
        Ok(())
    }

    /// Create a sub-group of `parent` keyed by the record's name and export into it.
    pub fn export_into(&self, parent: &mut Group) -> Result<(), StorageSystemError> {
        let group = parent.create_group(&self.name)?;
        self.export(group)
    }
}

/// Citations written for the framework itself when no configuration overrides them
pub fn default_framework_citations() -> Vec<CitationRecord> {
    vec![
        CitationRecord::named("savu")
            .with_description(
                "The Savu framework design is described in this paper.",
            )
            .with_doi("10.48550/arXiv.1610.08015")
            .with_endnote(
                "%0 Journal Article\n%T Savu: A Python-based, MPI Framework for Simultaneous \
                 Processing of Multiple, N-dimensional, Large Tomography Datasets\n\
                 %A Wadeson, Nicola\n%A Basham, Mark\n%D 2016\n%J arXiv preprint arXiv:1610.08015",
            )
            .with_bibtex(
                "@article{wadeson2016savu,\n  title={Savu: A Python-based, MPI Framework for \
                 Simultaneous Processing of Multiple, N-dimensional, Large Tomography Datasets},\n  \
                 author={Wadeson, Nicola and Basham, Mark},\n  \
                 journal={arXiv preprint arXiv:1610.08015},\n  year={2016}\n}",
            ),
    ]
}
