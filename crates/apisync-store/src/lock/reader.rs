//! Lock loading

#![allow(clippy::result_large_err)]

use apisync_core::model::{DataSource, NamedList};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::format::{module_shell, EndpointLock, IndexEntry, SharedTypeLock};
use super::layout;
use crate::errors::{corrupt_snapshot, io_error, lock_not_found, Result};

/// True when an index (primary or legacy) exists under `out_dir`
pub fn lock_exists(out_dir: &Path) -> bool {
    layout::existing_index_path(out_dir).is_some()
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(corrupt_snapshot(path, "listed in the lock index but missing"));
        }
        Err(e) => return Err(io_error("read_lock", path, e)),
    };
    serde_yaml::from_str(&content)
        .map_err(|e| corrupt_snapshot(path, format!("YAML parse error: {}", e)))
}

fn load_data_source(out_dir: &Path, entry: IndexEntry) -> Result<DataSource> {
    let mut modules = NamedList::new();
    for module_entry in &entry.modules {
        let mut module = module_shell(module_entry);
        for endpoint_name in &module_entry.endpoints {
            let path =
                layout::endpoint_path(out_dir, &entry.name, &module_entry.name, endpoint_name);
            let lock: EndpointLock = read_yaml(&path)?;
            module.endpoints.insert(lock.into_endpoint(endpoint_name));
        }
        modules.insert(module);
    }

    let mut shared_types = NamedList::new();
    for type_name in &entry.shared_types {
        let path = layout::shared_type_path(out_dir, &entry.name, type_name);
        let lock: SharedTypeLock = read_yaml(&path)?;
        shared_types.insert(lock.into_shared_type(type_name));
    }

    Ok(DataSource {
        name: entry.name,
        modules,
        shared_types,
    }
    .canonicalized())
}

/// Load every data source listed in the lock index, canonicalized.
///
/// # Errors
///
/// - `NotFound`: neither `api-lock.yml` nor `api.lock` exists
/// - `CorruptSnapshot`: the index or a listed detail file is missing or
///   does not parse
/// - `Io`: a file exists but could not be read
pub fn load_lock(out_dir: &Path) -> Result<Vec<DataSource>> {
    let index_path = layout::existing_index_path(out_dir).ok_or_else(|| lock_not_found(out_dir))?;
    let index: Vec<IndexEntry> = read_yaml(&index_path)?;

    let sources = index
        .into_iter()
        .map(|entry| load_data_source(out_dir, entry))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        path = %index_path.display(),
        sources = sources.len(),
        "loaded lock"
    );
    Ok(sources)
}
