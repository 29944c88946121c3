use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;
use super::named_list::{Named, NamedList};

/// A named group of endpoints, one controller of the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoints: NamedList<Endpoint>,
}

impl Module {
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

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.insert(endpoint);
        self
    }
}

impl Named for Module {
    const KIND: &'static str = "module";

    fn name(&self) -> &str {
        &self.name
    }
}
