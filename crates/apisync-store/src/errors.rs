//! Error handling for apisync-store
//!
//! Wraps apisync-core ExError with store-specific helpers

use apisync_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_entity(path.display().to_string())
        .with_message(err.to_string())
}

/// No lock index under the output directory
pub fn lock_not_found(out_dir: &Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("load_lock")
        .with_entity(out_dir.display().to_string())
        .with_message("no lock index found")
}

/// A lock file is missing or unreadable as a lock
pub fn corrupt_snapshot(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::CorruptSnapshot)
        .with_op("load_lock")
        .with_entity(path.display().to_string())
        .with_message(reason)
}

/// Entity that cannot be given a lock file name
pub fn unnamed_entity(data_source: &str, what: &str) -> ExError {
    ExError::new(ExErrorKind::MissingName)
        .with_op("save_lock")
        .with_data_source(data_source)
        .with_message(format!("cannot persist {} without a name", what))
}

pub fn serialization_error(path: &Path, err: serde_yaml::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("save_lock")
        .with_entity(path.display().to_string())
        .with_message(err.to_string())
}
