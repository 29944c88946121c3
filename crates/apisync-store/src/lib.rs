//! apisync-store - on-disk snapshot persistence
//!
//! Persists accepted data sources as a YAML lock (index plus per-entity
//! detail files) and writes generated client files. All writes go through
//! an atomic temp-then-rename.

#![allow(clippy::result_large_err)]

pub mod errors;
pub mod fs;
pub mod lock;

pub use fs::write_file_tree;
pub use lock::{load_lock, lock_exists, save_lock};
