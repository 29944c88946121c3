//! Code generation boundary and the built-in declaration generator.

pub mod declaration;
pub mod file_tree;

pub use declaration::{CodeGenerator, DeclarationGenerator};
pub use file_tree::{FileNode, FileTree};
