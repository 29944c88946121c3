//! Serialized lock records
//!
//! The index lists names only; endpoint and shared type content lives in
//! detail files. Parameters and properties are stored as name-keyed maps so
//! the files diff cleanly; their order is re-established on load.

use apisync_core::model::{
    DataSource, DataType, Endpoint, HttpMethod, Module, ParamLocation, Parameter, Property,
    SharedType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header written at the top of every lock file
pub const LOCK_HEADER: &str = "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleIndexEntry>,
    #[serde(default)]
    pub shared_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleIndexEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl IndexEntry {
    pub fn from_data_source(ds: &DataSource) -> Self {
        Self {
            name: ds.name.clone(),
            modules: ds
                .modules
                .iter()
                .map(|m| ModuleIndexEntry {
                    name: m.name.clone(),
                    description: m.description.clone(),
                    endpoints: m.endpoints.names().map(str::to_string).collect(),
                })
                .collect(),
            shared_types: ds.shared_types.names().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterLock {
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: ParamLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointLock {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterLock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<DataType>,
    #[serde(default)]
    pub response_type: DataType,
}

impl From<&Endpoint> for EndpointLock {
    fn from(ep: &Endpoint) -> Self {
        Self {
            name: ep.name.clone(),
            description: ep.description.clone(),
            path: ep.path.clone(),
            method: ep.method,
            parameters: ep
                .parameters
                .iter()
                .map(|p| {
                    (
                        p.name.clone(),
                        ParameterLock {
                            data_type: p.data_type.clone(),
                            required: p.required,
                            description: p.description.clone(),
                            location: p.location,
                        },
                    )
                })
                .collect(),
            body: ep.body.clone(),
            response_type: ep.response_type.clone(),
        }
    }
}

impl EndpointLock {
    /// Rebuild the endpoint under `name`; the index key wins over the
    /// stored name
    pub fn into_endpoint(self, name: &str) -> Endpoint {
        Endpoint {
            name: name.to_string(),
            description: self.description,
            path: self.path,
            method: self.method,
            parameters: self
                .parameters
                .into_iter()
                .map(|(name, p)| Parameter {
                    name,
                    data_type: p.data_type,
                    required: p.required,
                    description: p.description,
                    location: p.location,
                })
                .collect(),
            body: self.body,
            response_type: self.response_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLock {
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedTypeLock {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_args: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyLock>,
}

impl From<&SharedType> for SharedTypeLock {
    fn from(st: &SharedType) -> Self {
        Self {
            name: st.name.clone(),
            description: st.description.clone(),
            template_args: st.template_args.clone(),
            properties: st
                .properties
                .iter()
                .map(|p| {
                    (
                        p.name.clone(),
                        PropertyLock {
                            data_type: p.data_type.clone(),
                            required: p.required,
                            description: p.description.clone(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl SharedTypeLock {
    pub fn into_shared_type(self, name: &str) -> SharedType {
        SharedType {
            name: name.to_string(),
            description: self.description,
            template_args: self.template_args,
            properties: self
                .properties
                .into_iter()
                .map(|(name, p)| Property {
                    name,
                    data_type: p.data_type,
                    required: p.required,
                    description: p.description,
                })
                .collect(),
        }
    }
}

/// Module shell from its index entry; endpoints are filled by the reader
pub fn module_shell(entry: &ModuleIndexEntry) -> Module {
    Module::new(entry.name.clone()).with_description(entry.description.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_stored_by_name() {
        let ep = Endpoint::new("findPets", HttpMethod::Get, "/pet")
            .with_parameter(Parameter::new("status", DataType::primitive("string")))
            .with_parameter(Parameter::new("limit", DataType::primitive("integer")).required());

        let lock = EndpointLock::from(&ep);
        let keys: Vec<&str> = lock.parameters.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["limit", "status"]);

        let back = lock.into_endpoint("findPets");
        let names: Vec<&str> = back.parameters.names().collect();
        assert_eq!(names, vec!["limit", "status"]);
        assert!(back.parameters.get("limit").unwrap().required);
    }

    #[test]
    fn test_index_entry_lists_names_only() {
        let ds = DataSource::new("petstore")
            .with_module(
                Module::new("pet")
                    .with_description("Pet operations")
                    .with_endpoint(Endpoint::new("addPet", HttpMethod::Post, "/pet")),
            )
            .with_shared_type(SharedType::new("Pet"));

        let entry = IndexEntry::from_data_source(&ds);
        assert_eq!(entry.modules[0].endpoints, vec!["addPet".to_string()]);
        assert_eq!(entry.modules[0].description, "Pet operations");
        assert_eq!(entry.shared_types, vec!["Pet".to_string()]);
    }
}
