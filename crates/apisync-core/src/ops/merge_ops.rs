use serde::{Deserialize, Serialize};

use crate::errors::{ApiSyncError, Result};
use crate::model::{DataSource, EndpointRef, Named, NamedList};

/// What a single merge did to the local data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeOutcome {
    /// New remotely; appended locally and re-ordered
    Added,
    /// Present on both sides; local overwritten with remote content
    Replaced,
    /// Gone remotely; removed locally
    Removed,
    /// Absent on both sides
    NoOp,
}

/// A requested endpoint merge that could not be located
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMerge {
    pub target: EndpointRef,
    pub reason: String,
}

/// Result of an endpoint batch merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub applied: Vec<(EndpointRef, MergeOutcome)>,
    pub skipped: Vec<SkippedMerge>,
}

impl MergeReport {
    pub fn applied_refs(&self) -> Vec<&EndpointRef> {
        self.applied.iter().map(|(r, _)| r).collect()
    }
}

/// Three-way merge of one named entity from `remote` into `local`.
///
/// Absent remotely: remove locally. Absent locally: append, then the caller
/// re-orders. Both: overwrite in place with a clone of the remote entity.
fn merge_entity<T: Named + Clone>(
    local: &mut NamedList<T>,
    remote: &NamedList<T>,
    name: &str,
) -> MergeOutcome {
    match remote.get(name) {
        None => match local.remove(name) {
            Some(_) => MergeOutcome::Removed,
            None => MergeOutcome::NoOp,
        },
        Some(entity) => match local.insert(entity.clone()) {
            Some(_) => MergeOutcome::Replaced,
            None => MergeOutcome::Added,
        },
    }
}

/// Accept the remote version of one shared type.
///
/// # Arguments
/// * `local` - Data source being reconciled (mutated)
/// * `remote` - Freshly fetched data source (read only)
/// * `name` - Shared type name as shown in the diff
///
/// # Errors
/// * `SharedTypeStillReferenced` - The type is gone remotely but local
///   endpoints or other local shared types still reference it; nothing is
///   mutated. Merge the referencing entities first.
pub fn merge_shared_type(
    local: &mut DataSource,
    remote: &DataSource,
    name: &str,
) -> Result<MergeOutcome> {
    if !remote.shared_types.contains(name) && local.shared_types.contains(name) {
        let mut referenced_by: Vec<String> = local
            .endpoints_referencing(name)
            .iter()
            .map(ToString::to_string)
            .collect();
        referenced_by.extend(local.shared_types_referencing(name));
        if !referenced_by.is_empty() {
            return Err(ApiSyncError::SharedTypeStillReferenced {
                name: name.to_string(),
                referenced_by,
            });
        }
    }

    let outcome = merge_entity(&mut local.shared_types, &remote.shared_types, name);
    if outcome == MergeOutcome::Added {
        local.re_order();
    }
    Ok(outcome)
}

/// Accept the remote version of one module, all endpoints at once.
///
/// Never fails; a name absent on both sides is a no-op.
pub fn merge_module(local: &mut DataSource, remote: &DataSource, name: &str) -> MergeOutcome {
    let outcome = merge_entity(&mut local.modules, &remote.modules, name);
    if outcome == MergeOutcome::Added {
        local.re_order();
    }
    outcome
}

/// Accept the remote version of single endpoints.
///
/// Each target is resolved against both sides' modules. A missing module on
/// either side skips that target; endpoint merges never create modules.
/// Inserted endpoints are followed by a re-order of their module. The batch
/// is not transactional: targets before a skip stay applied.
pub fn merge_endpoints(
    local: &mut DataSource,
    remote: &DataSource,
    targets: &[EndpointRef],
) -> MergeReport {
    let mut report = MergeReport::default();

    for target in targets {
        let Some(remote_module) = remote.modules.get(&target.module) else {
            tracing::warn!(
                module = %target.module,
                endpoint = %target.endpoint,
                "remote module not found, skipping endpoint merge"
            );
            report.skipped.push(SkippedMerge {
                target: target.clone(),
                reason: format!("module `{}` not found remotely", target.module),
            });
            continue;
        };
        let Some(local_module) = local.modules.get_mut(&target.module) else {
            tracing::warn!(
                module = %target.module,
                endpoint = %target.endpoint,
                "local module not found, skipping endpoint merge"
            );
            report.skipped.push(SkippedMerge {
                target: target.clone(),
                reason: format!("module `{}` not found locally", target.module),
            });
            continue;
        };

        let outcome = merge_entity(
            &mut local_module.endpoints,
            &remote_module.endpoints,
            &target.endpoint,
        );
        if outcome == MergeOutcome::Added {
            local_module.endpoints.re_order();
        }
        report.applied.push((target.clone(), outcome));
    }

    report
}

/// Replace the whole local data source with the remote one
pub fn replace_all(local: &mut DataSource, remote: &DataSource) {
    *local = remote.clone();
}
