use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use super::endpoint_ref::EndpointRef;
use super::module::Module;
use super::named_list::NamedList;
use super::shared_type::SharedType;

/// One backend API description: its modules and shared types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modules: NamedList<Module>,
    #[serde(default)]
    pub shared_types: NamedList<SharedType>,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.insert(module);
        self
    }

    pub fn with_shared_type(mut self, shared_type: SharedType) -> Self {
        self.shared_types.insert(shared_type);
        self
    }

    /// Sort modules, shared types and every module's endpoints by name
    pub fn re_order(&mut self) {
        self.modules.re_order();
        self.shared_types.re_order();
        for module in self.modules.iter_mut() {
            module.endpoints.re_order();
        }
    }

    /// `re_order` plus parameter and property order. Applied to every
    /// snapshot load and every remote fetch.
    pub fn canonicalize(&mut self) {
        self.re_order();
        for module in self.modules.iter_mut() {
            for endpoint in module.endpoints.iter_mut() {
                endpoint.parameters.re_order();
            }
        }
        for shared_type in self.shared_types.iter_mut() {
            shared_type.properties.re_order();
        }
    }

    pub fn canonicalized(mut self) -> Self {
        self.canonicalize();
        self
    }

    /// Hex SHA-256 of the JSON serialization, order-sensitive
    pub fn content_digest(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// Shared type name -> endpoints referencing it
    pub fn shared_type_references(&self) -> BTreeMap<String, BTreeSet<EndpointRef>> {
        let mut out: BTreeMap<String, BTreeSet<EndpointRef>> = BTreeMap::new();
        for module in &self.modules {
            for endpoint in &module.endpoints {
                for type_name in endpoint.referenced_shared_types() {
                    out.entry(type_name)
                        .or_default()
                        .insert(EndpointRef::new(&module.name, &endpoint.name));
                }
            }
        }
        out
    }

    /// Endpoints referencing `type_name`, in `module.endpoint` order
    pub fn endpoints_referencing(&self, type_name: &str) -> Vec<EndpointRef> {
        self.shared_type_references()
            .remove(type_name)
            .map(|refs| refs.into_iter().collect())
            .unwrap_or_default()
    }

    /// Other shared types whose properties reference `type_name`, in
    /// declaration order
    pub fn shared_types_referencing(&self, type_name: &str) -> Vec<String> {
        self.shared_types
            .iter()
            .filter(|base| base.name != type_name)
            .filter(|base| base.referenced_shared_types().contains(type_name))
            .map(|base| base.name.clone())
            .collect()
    }

    pub fn endpoint_count(&self) -> usize {
        self.modules.iter().map(|m| m.endpoints.len()).sum()
    }
}
