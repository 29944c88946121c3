use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::data_type::DataType;
use super::named_list::{Named, NamedList};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

impl Property {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Named for Property {
    const KIND: &'static str = "property";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A reusable type definition referenced by endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: NamedList<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_args: Vec<String>,
}

impl SharedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.insert(property);
        self
    }

    pub fn with_template_args(mut self, args: Vec<String>) -> Self {
        self.template_args = args;
        self
    }

    /// Other shared types mentioned by this type's properties
    pub fn referenced_shared_types(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for prop in &self.properties {
            prop.data_type.collect_shared_types(&mut out);
        }
        out
    }
}

impl Named for SharedType {
    const KIND: &'static str = "shared type";

    fn name(&self) -> &str {
        &self.name
    }
}
