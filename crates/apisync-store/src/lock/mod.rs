//! Snapshot store: a YAML lock index plus one detail file per endpoint and
//! per shared type

pub mod format;
pub mod layout;
mod reader;
mod writer;

pub use reader::{load_lock, lock_exists};
pub use writer::save_lock;
