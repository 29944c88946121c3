//! Error helpers for the engine layer

use apisync_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn config_error(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(message)
}

pub fn fetch_error(data_source: &str, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Fetch)
        .with_op("fetch")
        .with_data_source(data_source)
        .with_message(message)
}

/// The session has no active data source
pub fn config_not_found(op: &str, name: Option<&str>) -> ExError {
    let err = ExError::new(ExErrorKind::ConfigNotFound).with_op(op);
    match name {
        Some(name) => err
            .with_entity(name)
            .with_message("no data source configured under this name"),
        None => err.with_message("no active data source"),
    }
}

pub fn no_remote(op: &str, data_source: &str) -> ExError {
    ExError::new(ExErrorKind::NoRemote)
        .with_op(op)
        .with_data_source(data_source)
        .with_message("remote schema has not been fetched")
}

/// A blocking task panicked or was cancelled
pub fn join_error(op: &str, err: tokio::task::JoinError) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op)
        .with_message(format!("blocking task failed: {}", err))
}
