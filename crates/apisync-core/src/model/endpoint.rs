use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::data_type::DataType;
use super::named_list::{Named, NamedList};

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels in the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    #[default]
    Query,
    Path,
    Header,
    Body,
    Form,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Path => "path",
            ParamLocation::Header => "header",
            ParamLocation::Body => "body",
            ParamLocation::Form => "form",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: ParamLocation,
}

impl Parameter {
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

    pub fn in_location(mut self, location: ParamLocation) -> Self {
        self.location = location;
        self
    }
}

impl Named for Parameter {
    const KIND: &'static str = "parameter";

    fn name(&self) -> &str {
        &self.name
    }
}

/// One callable API operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub parameters: NamedList<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<DataType>,
    #[serde(default)]
    pub response_type: DataType,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.insert(parameter);
        self
    }

    pub fn with_body(mut self, body: DataType) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_response(mut self, response_type: DataType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Shared types referenced by the response, body and parameters
    pub fn referenced_shared_types(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.response_type.collect_shared_types(&mut out);
        if let Some(body) = &self.body {
            body.collect_shared_types(&mut out);
        }
        for param in &self.parameters {
            param.data_type.collect_shared_types(&mut out);
        }
        out
    }
}

impl Named for Endpoint {
    const KIND: &'static str = "endpoint";

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_shared_types_covers_all_slots() {
        let ep = Endpoint::new("updatePet", HttpMethod::Put, "/pet/{id}")
            .with_parameter(Parameter::new("owner", DataType::shared("Owner")))
            .with_body(DataType::shared("Pet"))
            .with_response(DataType::shared("ApiResponse"));

        let refs: Vec<String> = ep.referenced_shared_types().into_iter().collect();
        assert_eq!(refs, vec!["ApiResponse", "Owner", "Pet"]);
    }

    #[test]
    fn test_serde_defaults_and_lowercase_enums() {
        let json = r#"{"name":"getPet","path":"/pet","method":"get",
            "parameters":[{"name":"id","data_type":{"type_name":"number"},"location":"path"}]}"#;
        let ep: Endpoint = serde_json::from_str(json).unwrap();
        assert_eq!(ep.method, HttpMethod::Get);
        assert_eq!(
            ep.parameters.get("id").map(|p| p.location),
            Some(ParamLocation::Path)
        );
        assert!(ep.body.is_none());
        assert_eq!(ep.response_type, DataType::default());
    }
}
