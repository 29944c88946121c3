//! Name-level diff over two ordered collections.
//!
//! The core entry point is [`diff`]; [`diff_data_sources`] runs it over a
//! local/remote pair the way a reconciliation session needs it (modules with
//! endpoint sub-diff, shared types without).

use crate::diff::model::{ChangeEntry, ChangeKind, DiffReport, EntityKind, Resolution};
use crate::model::{
    DataSource, DataType, Endpoint, Module, Named, NamedList, Parameter, Property, SharedType,
};

/// An entity the diff engine can compare
pub trait DiffSubject: Named + PartialEq {
    const ENTITY: EntityKind;

    fn describe_added(&self) -> Vec<String> {
        vec![format!("{} `{}` added", Self::KIND, self.name())]
    }

    fn describe_removed(&self) -> Vec<String> {
        vec![format!("{} `{}` removed", Self::KIND, self.name())]
    }

    /// Detail lines for `self` (local) vs `remote`, known to be unequal
    fn describe_modification(&self, remote: &Self) -> Vec<String>;

    /// Child-level entries attached to a modified entry when sub-diffing
    fn nested_changes(&self, _remote: &Self) -> Vec<ChangeEntry> {
        Vec::new()
    }
}

/// Compare `local` against `remote` by name.
///
/// Emits `Added*` (remote order), then `Removed*` and `Modified*` (local
/// order). Unchanged names never appear; every other name appears once.
/// Entities without a name are not addressable and are skipped.
pub fn diff<T: DiffSubject>(
    local: &NamedList<T>,
    remote: &NamedList<T>,
    with_children: bool,
) -> Vec<ChangeEntry> {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut modified = Vec::new();

    for r in remote.iter().filter(|r| !r.name().is_empty()) {
        if !local.contains(r.name()) {
            added.push(entry::<T>(r.name(), ChangeKind::Added, r.describe_added()));
        }
    }

    for l in local.iter().filter(|l| !l.name().is_empty()) {
        match remote.get(l.name()) {
            None => removed.push(entry::<T>(l.name(), ChangeKind::Removed, l.describe_removed())),
            Some(r) if l != r => {
                let mut change =
                    entry::<T>(l.name(), ChangeKind::Modified, l.describe_modification(r));
                if with_children {
                    change.endpoint_changes = l.nested_changes(r);
                }
                if T::ENTITY == EntityKind::Module && change.details.len() > 1 {
                    change.resolution = Resolution::RequiresEndpointResolution;
                }
                modified.push(change);
            }
            Some(_) => {}
        }
    }

    added.extend(removed);
    added.extend(modified);
    added
}

fn entry<T: DiffSubject>(name: &str, kind: ChangeKind, details: Vec<String>) -> ChangeEntry {
    ChangeEntry {
        entity: T::ENTITY,
        name: name.to_string(),
        kind,
        details,
        resolution: Resolution::Selectable,
        endpoint_changes: Vec::new(),
    }
}

pub fn diff_modules(local: &DataSource, remote: &DataSource) -> Vec<ChangeEntry> {
    diff(&local.modules, &remote.modules, true)
}

pub fn diff_shared_types(local: &DataSource, remote: &DataSource) -> Vec<ChangeEntry> {
    diff(&local.shared_types, &remote.shared_types, false)
}

pub fn diff_data_sources(local: &DataSource, remote: &DataSource) -> DiffReport {
    DiffReport {
        module_changes: diff_modules(local, remote),
        shared_type_changes: diff_shared_types(local, remote),
    }
}

impl DiffSubject for Module {
    const ENTITY: EntityKind = EntityKind::Module;

    fn describe_added(&self) -> Vec<String> {
        vec![format!(
            "module `{}` added ({} endpoints)",
            self.name,
            self.endpoints.len()
        )]
    }

    fn describe_removed(&self) -> Vec<String> {
        vec![format!(
            "module `{}` removed ({} endpoints)",
            self.name,
            self.endpoints.len()
        )]
    }

    fn describe_modification(&self, remote: &Self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.description != remote.description {
            lines.push(format!("module `{}`: description changed", self.name));
        }
        for change in diff(&self.endpoints, &remote.endpoints, false) {
            let verb = match change.kind {
                ChangeKind::Added => "added",
                ChangeKind::Removed => "removed",
                ChangeKind::Modified => "modified",
            };
            lines.push(format!(
                "module `{}`: endpoint `{}` {}",
                self.name, change.name, verb
            ));
        }
        if lines.is_empty() {
            // same endpoints and description, different order
            lines.push(format!("module `{}`: endpoint order changed", self.name));
        }
        lines
    }

    fn nested_changes(&self, remote: &Self) -> Vec<ChangeEntry> {
        diff(&self.endpoints, &remote.endpoints, false)
    }
}

impl DiffSubject for Endpoint {
    const ENTITY: EntityKind = EntityKind::Endpoint;

    fn describe_modification(&self, remote: &Self) -> Vec<String> {
        let prefix = format!("endpoint `{}`", self.name);
        let mut lines = Vec::new();
        if self.method != remote.method || self.path != remote.path {
            lines.push(format!(
                "{}: {} {} -> {} {}",
                prefix, self.method, self.path, remote.method, remote.path
            ));
        }
        if self.description != remote.description {
            lines.push(format!("{}: description changed", prefix));
        }
        lines.extend(member_lines(&prefix, &self.parameters, &remote.parameters));
        if self.body != remote.body {
            lines.push(format!(
                "{}: body changed ({} -> {})",
                prefix,
                optional_type(self.body.as_ref()),
                optional_type(remote.body.as_ref())
            ));
        }
        if self.response_type != remote.response_type {
            lines.push(format!(
                "{}: response changed (`{}` -> `{}`)",
                prefix, self.response_type, remote.response_type
            ));
        }
        if lines.is_empty() {
            lines.push(format!("{}: parameter order changed", prefix));
        }
        lines
    }
}

impl DiffSubject for SharedType {
    const ENTITY: EntityKind = EntityKind::SharedType;

    fn describe_modification(&self, remote: &Self) -> Vec<String> {
        let prefix = format!("shared type `{}`", self.name);
        let mut lines = Vec::new();
        if self.description != remote.description {
            lines.push(format!("{}: description changed", prefix));
        }
        if self.template_args != remote.template_args {
            lines.push(format!(
                "{}: template arguments changed (<{}> -> <{}>)",
                prefix,
                self.template_args.join(", "),
                remote.template_args.join(", ")
            ));
        }
        lines.extend(member_lines(&prefix, &self.properties, &remote.properties));
        if lines.is_empty() {
            lines.push(format!("{}: property order changed", prefix));
        }
        lines
    }
}

/// Parameters and properties share one shape for diagnostics
trait Member: Named + PartialEq {
    fn data_type(&self) -> &DataType;
    fn required(&self) -> bool;
    fn description(&self) -> &str;
    fn extra_changes(&self, _remote: &Self) -> Vec<String> {
        Vec::new()
    }
}

impl Member for Parameter {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }
    fn required(&self) -> bool {
        self.required
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn extra_changes(&self, remote: &Self) -> Vec<String> {
        if self.location != remote.location {
            vec![format!(
                "moved from {} to {}",
                self.location.as_str(),
                remote.location.as_str()
            )]
        } else {
            Vec::new()
        }
    }
}

impl Member for Property {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }
    fn required(&self) -> bool {
        self.required
    }
    fn description(&self) -> &str {
        &self.description
    }
}

fn member_lines<M: Member>(prefix: &str, local: &NamedList<M>, remote: &NamedList<M>) -> Vec<String> {
    let mut lines = Vec::new();
    for r in remote.iter().filter(|r| !local.contains(r.name())) {
        lines.push(format!("{}: {} `{}` added", prefix, M::KIND, r.name()));
    }
    for l in local.iter() {
        let Some(r) = remote.get(l.name()) else {
            lines.push(format!("{}: {} `{}` removed", prefix, M::KIND, l.name()));
            continue;
        };
        if l == r {
            continue;
        }
        let mut aspects = Vec::new();
        if l.data_type() != r.data_type() {
            aspects.push(format!("`{}` -> `{}`", l.data_type(), r.data_type()));
        }
        if l.required() != r.required() {
            aspects.push(if r.required() {
                "now required".to_string()
            } else {
                "now optional".to_string()
            });
        }
        if l.description() != r.description() {
            aspects.push("description changed".to_string());
        }
        aspects.extend(l.extra_changes(r));
        lines.push(format!(
            "{}: {} `{}` changed ({})",
            prefix,
            M::KIND,
            l.name(),
            aspects.join("; ")
        ));
    }
    lines
}

fn optional_type(ty: Option<&DataType>) -> String {
    match ty {
        Some(ty) => format!("`{}`", ty),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;

    fn pet_module(endpoints: &[&str]) -> Module {
        endpoints.iter().fold(Module::new("pet"), |m, name| {
            m.with_endpoint(Endpoint::new(*name, HttpMethod::Post, format!("/pet/{}", name)))
        })
    }

    #[test]
    fn test_single_endpoint_addition_is_selectable() {
        let local: NamedList<Module> = vec![pet_module(&["addPet"])].into_iter().collect();
        let remote: NamedList<Module> =
            vec![pet_module(&["addPet", "deletePet"])].into_iter().collect();

        let changes = diff(&local, &remote, true);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Modified);
        assert_eq!(
            changes[0].details,
            vec!["module `pet`: endpoint `deletePet` added"]
        );
        assert!(changes[0].is_selectable());
        assert!(changes[0].modified_endpoint_names().is_empty());
    }

    #[test]
    fn test_multiple_endpoint_changes_require_resolution() {
        let local: NamedList<Module> = vec![pet_module(&["addPet", "getPet"])]
            .into_iter()
            .collect();
        let remote: NamedList<Module> = vec![pet_module(&["addPet", "findPets"])]
            .into_iter()
            .collect();

        let changes = diff(&local, &remote, true);
        assert_eq!(changes[0].resolution, Resolution::RequiresEndpointResolution);
        assert_eq!(changes[0].endpoint_changes.len(), 2);
    }

    #[test]
    fn test_without_children_no_endpoint_entries() {
        let local: NamedList<Module> = vec![pet_module(&["addPet"])].into_iter().collect();
        let remote: NamedList<Module> =
            vec![pet_module(&["addPet", "deletePet"])].into_iter().collect();

        let changes = diff(&local, &remote, false);
        assert!(changes[0].endpoint_changes.is_empty());
    }

    #[test]
    fn test_property_type_change_detail() {
        let local: NamedList<SharedType> = vec![SharedType::new("Pet")
            .with_property(Property::new("tag", DataType::primitive("string")))]
        .into_iter()
        .collect();
        let remote: NamedList<SharedType> = vec![SharedType::new("Pet")
            .with_property(Property::new("tag", DataType::primitive("number")).required())]
        .into_iter()
        .collect();

        let changes = diff(&local, &remote, false);
        assert_eq!(
            changes[0].details,
            vec!["shared type `Pet`: property `tag` changed (`string` -> `number`; now required)"]
        );
    }

    #[test]
    fn test_output_grouped_added_removed_modified() {
        let local: NamedList<SharedType> = vec![
            SharedType::new("Keep"),
            SharedType::new("Gone"),
            SharedType::new("Edit").with_description("old"),
        ]
        .into_iter()
        .collect();
        let remote: NamedList<SharedType> = vec![
            SharedType::new("Edit").with_description("new"),
            SharedType::new("Keep"),
            SharedType::new("New"),
        ]
        .into_iter()
        .collect();

        let changes = diff(&local, &remote, false);
        let summary: Vec<(ChangeKind, &str)> =
            changes.iter().map(|c| (c.kind, c.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (ChangeKind::Added, "New"),
                (ChangeKind::Removed, "Gone"),
                (ChangeKind::Modified, "Edit"),
            ]
        );
    }
}
