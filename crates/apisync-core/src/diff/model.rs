//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` so a
//! report can be printed, persisted or compared in tests.

use serde::{Deserialize, Serialize};

use crate::model::EndpointRef;

/// Which kind of entity a change entry describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntityKind {
    Module,
    Endpoint,
    SharedType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    /// Present remotely only
    Added,
    /// Present locally only
    Removed,
    /// Present on both sides with different content
    Modified,
}

/// Whether an operator can accept the entry with one whole-entity merge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Resolution {
    Selectable,
    /// Module with more than one detail line; merge per endpoint
    RequiresEndpointResolution,
}

/// One name-level change between local and remote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeEntry {
    pub entity: EntityKind,
    pub name: String,
    pub kind: ChangeKind,
    /// Diagnostic lines; never parsed back
    pub details: Vec<String>,
    pub resolution: Resolution,
    /// Endpoint-level entries of a modified module (empty otherwise)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoint_changes: Vec<ChangeEntry>,
}

impl ChangeEntry {
    pub fn is_selectable(&self) -> bool {
        self.resolution == Resolution::Selectable
    }

    /// Endpoints present on both sides whose content differs.
    ///
    /// Endpoints added or removed inside the module are not listed here;
    /// they appear in `endpoint_changes` as `Added`/`Removed`.
    pub fn modified_endpoint_names(&self) -> Vec<&str> {
        self.endpoint_changes
            .iter()
            .filter(|c| c.kind == ChangeKind::Modified)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Result of one `calc_diffs` run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiffReport {
    pub module_changes: Vec<ChangeEntry>,
    pub shared_type_changes: Vec<ChangeEntry>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.module_changes.is_empty() && self.shared_type_changes.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.module_changes.len() + self.shared_type_changes.len()
    }

    pub fn module(&self, name: &str) -> Option<&ChangeEntry> {
        self.module_changes.iter().find(|c| c.name == name)
    }

    pub fn shared_type(&self, name: &str) -> Option<&ChangeEntry> {
        self.shared_type_changes.iter().find(|c| c.name == name)
    }

    /// Every endpoint an operator can merge individually
    pub fn endpoint_choices(&self) -> Vec<EndpointRef> {
        self.module_changes
            .iter()
            .flat_map(|m| {
                m.endpoint_changes
                    .iter()
                    .map(move |e| EndpointRef::new(&m.name, &e.name))
            })
            .collect()
    }

    /// Module names that may be merged whole
    pub fn selectable_modules(&self) -> Vec<&str> {
        self.module_changes
            .iter()
            .filter(|c| c.is_selectable())
            .map(|c| c.name.as_str())
            .collect()
    }
}
