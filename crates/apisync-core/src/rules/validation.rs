use crate::errors::{ApiSyncError, Result};
use crate::model::DataSource;

use super::invariants;

/// Validate names across every loaded data source
///
/// With more than one source each source needs a name; within a source every
/// shared type, property, module, endpoint and parameter needs one.
///
/// # Errors
/// Returns `MissingName` for the first unnamed entity, carrying its
/// description as context. Call [`invariants::find_unnamed_entities`] for the
/// full list.
pub fn validate_sources(sources: &[DataSource]) -> Result<()> {
    if sources.len() > 1 {
        if let Some(pos) = sources.iter().position(|ds| ds.name.is_empty()) {
            return Err(ApiSyncError::MissingName {
                entity_kind: "data source".to_string(),
                context: format!(
                    "data source #{} (every source needs a name when several are configured)",
                    pos + 1
                ),
            });
        }
    }

    for ds in sources {
        if let Some(first) = invariants::find_unnamed_entities(ds).into_iter().next() {
            return Err(ApiSyncError::MissingName {
                entity_kind: first.entity_kind.to_string(),
                context: first.context,
            });
        }
    }

    Ok(())
}

/// Check that module and shared-type names are usable as identifiers
///
/// # Errors
/// Returns `NamingConvention` listing every offending name across all
/// sources when either list is non-empty.
pub fn check_naming_convention(sources: &[DataSource]) -> Result<()> {
    let mut modules = Vec::new();
    let mut shared_types = Vec::new();
    for ds in sources {
        let (m, s) = invariants::find_non_ascii_names(ds);
        modules.extend(m);
        shared_types.extend(s);
    }

    if modules.is_empty() && shared_types.is_empty() {
        return Ok(());
    }
    Err(ApiSyncError::NamingConvention {
        modules,
        shared_types,
    })
}

/// Names end up as lock file and directory names, so none may contain a
/// path separator, NUL or `..`
///
/// # Errors
/// Returns `UnsafePathName` listing every offending name across all sources.
pub fn validate_path_names(sources: &[DataSource]) -> Result<()> {
    let names: Vec<String> = sources
        .iter()
        .flat_map(invariants::find_unsafe_path_names)
        .collect();
    if names.is_empty() {
        return Ok(());
    }
    Err(ApiSyncError::UnsafePathName { names })
}

/// Every shared type an endpoint references must exist in its source
///
/// # Errors
/// Returns `DanglingReference` for the first missing type.
pub fn validate_references(ds: &DataSource) -> Result<()> {
    match invariants::find_dangling_references(ds).into_iter().next() {
        Some((endpoint, type_name)) => Err(ApiSyncError::DanglingReference {
            endpoint: endpoint.to_string(),
            type_name,
        }),
        None => Ok(()),
    }
}
