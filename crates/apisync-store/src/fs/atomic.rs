//! Atomic write primitives
//!
//! Uses temp->rename so readers never observe a partial file

use crate::errors::{io_error, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn temp_path_for(target_path: &Path) -> PathBuf {
    let file_name = target_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target_path.with_file_name(format!("{}.tmp", file_name))
}

/// Atomically write bytes to a file, creating parent directories
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_dir", parent, e))?;
    }

    let temp_path = temp_path_for(target_path);
    fs::write(&temp_path, content).map_err(|e| io_error("write_temp", &temp_path, e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_temp", target_path, e))?;

    Ok(())
}

/// Delete every file under `dir` not listed in `keep`, then any directory
/// left empty below `dir`. A missing `dir` is not an error.
///
/// Returns whether anything under `dir` was kept.
pub fn prune_dir(dir: &Path, keep: &BTreeSet<PathBuf>) -> Result<bool> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(io_error("read_dir", dir, e)),
    };

    let mut kept = false;
    for entry in entries {
        let path = entry.map_err(|e| io_error("read_dir", dir, e))?.path();
        if path.is_dir() {
            if prune_dir(&path, keep)? {
                kept = true;
            } else {
                fs::remove_dir(&path).map_err(|e| io_error("remove_dir", &path, e))?;
            }
        } else if keep.contains(&path) {
            kept = true;
        } else {
            fs::remove_file(&path).map_err(|e| io_error("remove_file", &path, e))?;
        }
    }
    Ok(kept)
}
