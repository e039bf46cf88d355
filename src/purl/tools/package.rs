//! Minimal tabular data package descriptor.
//!
//! Only the members the enrichment pass reads or writes are typed; every
//! other key is carried through the `extra` maps so a load/save cycle keeps
//! it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::purl::tools::error::{Result, ToolError};

pub const PACKAGE_PROFILE: &str = "tabular-data-package";
pub const RESOURCE_PROFILE: &str = "tabular-data-resource";

/// A data package: an ordered list of named resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One table of a package together with its schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default)]
    pub schema: Schema,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Table schema: ordered fields plus the tokens read as missing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<SchemaField>,
    #[serde(rename = "missingValues", default)]
    pub missing_values: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A schema field. Extension attributes such as `rdftype` live in
/// `attributes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }
}

impl Schema {
    /// Appends tokens not already listed, keeping the existing order.
    pub fn extend_missing_values<S: AsRef<str>>(&mut self, tokens: &[S]) -> usize {
        let mut added = 0;
        for token in tokens {
            let token = token.as_ref();
            if !self.missing_values.iter().any(|existing| existing == token) {
                self.missing_values.push(token.to_string());
                added += 1;
            }
        }
        added
    }
}

impl DataPackage {
    pub fn new() -> Self {
        Self {
            profile: Some(PACKAGE_PROFILE.to_string()),
            ..Self::default()
        }
    }

    /// Reads a JSON package descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|err| ToolError::file(path, err))?;
        let package: DataPackage = serde_json::from_str(&source)?;
        if package.resources.iter().any(|resource| resource.name.is_empty()) {
            return Err(ToolError::InvalidPackage(format!(
                "{} contains a resource without a name",
                path.display()
            )));
        }
        Ok(package)
    }

    /// Writes the descriptor as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|err| ToolError::file(path, err))
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    pub fn resource_names(&self) -> Vec<String> {
        self.resources.iter().map(|resource| resource.name.clone()).collect()
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Swaps in `resource` for the existing resource of the same name, at the
    /// same position. Replacing with an identical descriptor is a no-op.
    pub fn replace_resource(&mut self, resource: Resource) -> Result<()> {
        let slot = self
            .resources
            .iter_mut()
            .find(|existing| existing.name == resource.name)
            .ok_or_else(|| ToolError::UnknownResource(resource.name.clone()))?;
        *slot = resource;
        Ok(())
    }
}
