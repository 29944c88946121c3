//! Lock persistence

#![allow(clippy::result_large_err)]

use apisync_core::errors::ExError;
use apisync_core::model::DataSource;
use apisync_core::rules;
use apisync_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::format::{EndpointLock, IndexEntry, SharedTypeLock, LOCK_HEADER};
use super::layout;
use crate::errors::{serialization_error, unnamed_entity, Result};
use crate::fs::{atomic_write, prune_dir};

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_yaml::to_string(value).map_err(|e| serialization_error(path, e))?;
    atomic_write(path, format!("{}{}", LOCK_HEADER, body).as_bytes())
}

/// Every name that becomes a file or directory must be present and a single
/// path segment
fn check_names(sources: &[DataSource]) -> Result<()> {
    for ds in sources {
        if ds.name.is_empty() {
            return Err(unnamed_entity("", "data source"));
        }
        for module in &ds.modules {
            if module.name.is_empty() {
                return Err(unnamed_entity(&ds.name, "module"));
            }
            if module.endpoints.iter().any(|e| e.name.is_empty()) {
                return Err(unnamed_entity(&ds.name, "endpoint"));
            }
        }
        if ds.shared_types.iter().any(|t| t.name.is_empty()) {
            return Err(unnamed_entity(&ds.name, "shared type"));
        }
    }
    rules::validate_path_names(sources).map_err(|e| ExError::from(e).with_op("save_lock"))
}

/// Write the detail files of `ds`; returns their paths
fn write_data_source(out_dir: &Path, ds: &DataSource) -> Result<BTreeSet<PathBuf>> {
    let mut written = BTreeSet::new();

    for module in &ds.modules {
        for endpoint in &module.endpoints {
            let path = layout::endpoint_path(out_dir, &ds.name, &module.name, &endpoint.name);
            write_yaml(&path, &EndpointLock::from(endpoint))?;
            written.insert(path);
        }
    }

    for shared_type in &ds.shared_types {
        let path = layout::shared_type_path(out_dir, &ds.name, &shared_type.name);
        write_yaml(&path, &SharedTypeLock::from(shared_type))?;
        written.insert(path);
    }

    Ok(written)
}

fn write_lock(out_dir: &Path, sources: &[DataSource]) -> Result<()> {
    check_names(sources)?;

    let mut written = Vec::with_capacity(sources.len());
    for ds in sources {
        written.push(write_data_source(out_dir, ds)?);
    }

    let index: Vec<IndexEntry> = sources.iter().map(IndexEntry::from_data_source).collect();
    write_yaml(&layout::index_path(out_dir), &index)?;

    for (ds, keep) in sources.iter().zip(&written) {
        prune_dir(&layout::modules_dir(out_dir, &ds.name), keep)?;
        prune_dir(&layout::shared_types_dir(out_dir, &ds.name), keep)?;
    }
    Ok(())
}

/// Persist `sources` under `out_dir`.
///
/// Names are checked before anything is written. Detail files go first and
/// the index last; files the new index no longer lists are deleted only once
/// it is in place. A save that fails midway leaves the previous index
/// pointing at files that still exist and parse.
///
/// # Errors
///
/// - `MissingName`: an entity has an empty name
/// - `InvalidInput`: a name contains a path separator, NUL or `..`
/// - `Io`: a write or stale-file removal failed
/// - `Serialization`: YAML encoding failed
pub fn save_lock(out_dir: &Path, sources: &[DataSource]) -> Result<()> {
    let start = Instant::now();
    log_op_start!("save_lock", sources = sources.len());

    let result = write_lock(out_dir, sources);

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => {
            log_op_end!("save_lock", duration_ms = duration_ms);
            Ok(())
        }
        Err(err) => {
            log_op_error!("save_lock", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
