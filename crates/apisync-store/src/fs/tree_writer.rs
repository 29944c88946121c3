//! Writes generated file trees to disk.

use apisync_core::FileTree;
use std::path::Path;

use super::atomic::atomic_write;
use crate::errors::Result;

/// Write every file of `tree` under `out_dir`, returning the file count
pub fn write_file_tree(out_dir: &Path, tree: &FileTree) -> Result<usize> {
    let files = tree.files();
    for (relative, content) in &files {
        let target = relative
            .split('/')
            .fold(out_dir.to_path_buf(), |acc, seg| acc.join(seg));
        atomic_write(&target, content.as_bytes())?;
    }
    tracing::debug!(out_dir = %out_dir.display(), files = files.len(), "wrote generated files");
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let mut sub = FileTree::new();
        sub.add_file("api.d.ts", "declare namespace API {}\n");
        let mut tree = FileTree::new();
        tree.add_dir("petstore", sub);
        tree.add_file("api.d.ts", "/// <reference path=\"./petstore/api.d.ts\" />\n");

        let count = write_file_tree(temp_dir.path(), &tree).unwrap();

        assert_eq!(count, 2);
        let nested = std::fs::read_to_string(temp_dir.path().join("petstore/api.d.ts")).unwrap();
        assert_eq!(nested, "declare namespace API {}\n");
    }
}
