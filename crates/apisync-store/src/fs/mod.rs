//! Filesystem primitives: atomic writes and generated-tree output

mod atomic;
mod tree_writer;

pub use atomic::{atomic_write, prune_dir};
pub use tree_writer::write_file_tree;
