use crate::model::{DataSource, EndpointRef};

/// An entity without a name, with the context an operator needs to find it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnnamedEntity {
    pub entity_kind: &'static str,
    pub context: String,
}

fn unnamed(entity_kind: &'static str, context: String) -> UnnamedEntity {
    UnnamedEntity {
        entity_kind,
        context,
    }
}

/// Find every unnamed shared type, property, module, endpoint and parameter
///
/// Returned in declaration order, shared types first.
pub fn find_unnamed_entities(ds: &DataSource) -> Vec<UnnamedEntity> {
    let mut found = Vec::new();

    for base in &ds.shared_types {
        if base.name.is_empty() {
            found.push(unnamed(
                "shared type",
                format!("shared type described as \"{}\"", base.description),
            ));
        }
        for prop in base.properties.iter().filter(|p| p.name.is_empty()) {
            found.push(unnamed(
                "property",
                format!(
                    "a property of shared type `{}` (described as \"{}\")",
                    base.name, prop.description
                ),
            ));
        }
    }

    for module in &ds.modules {
        if module.name.is_empty() {
            found.push(unnamed(
                "module",
                format!("module described as \"{}\"", module.description),
            ));
        }
        for endpoint in &module.endpoints {
            if endpoint.name.is_empty() {
                found.push(unnamed(
                    "endpoint",
                    format!(
                        "an endpoint of module `{}` ({} {})",
                        module.name, endpoint.method, endpoint.path
                    ),
                ));
            }
            for param in endpoint.parameters.iter().filter(|p| p.name.is_empty()) {
                found.push(unnamed(
                    "parameter",
                    format!(
                        "a parameter of endpoint `{}.{}` (described as \"{}\")",
                        module.name, endpoint.name, param.description
                    ),
                ));
            }
        }
    }

    found
}

/// Module and shared-type names containing non-ASCII characters
///
/// Returns `(modules, shared_types)`.
pub fn find_non_ascii_names(ds: &DataSource) -> (Vec<String>, Vec<String>) {
    let modules = ds
        .modules
        .names()
        .filter(|n| !n.is_ascii())
        .map(str::to_string)
        .collect();
    let shared_types = ds
        .shared_types
        .names()
        .filter(|n| !n.is_ascii())
        .map(str::to_string)
        .collect();
    (modules, shared_types)
}

/// A name that cannot be a single path segment under the lock directory
pub fn is_unsafe_path_name(name: &str) -> bool {
    name.contains(['/', '\\', '\0']) || name.contains("..")
}

/// Source, module, endpoint and shared-type names that would escape their
/// lock directory, as written (`module.endpoint` for endpoints)
pub fn find_unsafe_path_names(ds: &DataSource) -> Vec<String> {
    let mut found = Vec::new();
    if is_unsafe_path_name(&ds.name) {
        found.push(ds.name.clone());
    }
    for module in &ds.modules {
        if is_unsafe_path_name(&module.name) {
            found.push(module.name.clone());
        }
        for endpoint in module.endpoints.iter().filter(|e| is_unsafe_path_name(&e.name)) {
            found.push(EndpointRef::new(&module.name, &endpoint.name).to_string());
        }
    }
    found.extend(
        ds.shared_types
            .names()
            .filter(|n| is_unsafe_path_name(n))
            .map(str::to_string),
    );
    found
}

/// Endpoints referencing a shared type the data source does not define
///
/// Returns `(endpoint, missing type)` pairs in `module.endpoint` order.
pub fn find_dangling_references(ds: &DataSource) -> Vec<(EndpointRef, String)> {
    let mut dangling = Vec::new();
    for (type_name, refs) in ds.shared_type_references() {
        if ds.shared_types.contains(&type_name) {
            continue;
        }
        for r in refs {
            dangling.push((r, type_name.clone()));
        }
    }
    dangling.sort();
    dangling
}
