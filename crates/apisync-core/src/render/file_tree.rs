use std::collections::BTreeMap;

/// One entry of a generated tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    File(String),
    Dir(FileTree),
}

/// Nested name -> file/dir map produced by a code generator
///
/// Names are single path segments; `BTreeMap` keeps iteration order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    entries: BTreeMap<String, FileNode>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries
            .insert(name.into(), FileNode::File(content.into()));
    }

    pub fn add_dir(&mut self, name: impl Into<String>, tree: FileTree) {
        self.entries.insert(name.into(), FileNode::Dir(tree));
    }

    pub fn get(&self, name: &str) -> Option<&FileNode> {
        self.entries.get(name)
    }

    /// Look up a file by `/`-separated relative path
    pub fn file(&self, path: &str) -> Option<&str> {
        let (head, rest) = match path.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        match (self.entries.get(head)?, rest) {
            (FileNode::File(content), None) => Some(content),
            (FileNode::Dir(tree), Some(rest)) => tree.file(rest),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every file as `(relative path, content)`, depth-first in name order
    pub fn files(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_files("", &mut out);
        out
    }

    fn collect_files<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (name, node) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            match node {
                FileNode::File(content) => out.push((path, content.as_str())),
                FileNode::Dir(tree) => tree.collect_files(&path, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_flattens_in_name_order() {
        let mut sub = FileTree::new();
        sub.add_file("b.d.ts", "b");
        sub.add_file("a.d.ts", "a");

        let mut tree = FileTree::new();
        tree.add_file("api.d.ts", "root");
        tree.add_dir("petstore", sub);

        let files = tree.files();
        assert_eq!(
            files,
            vec![
                ("api.d.ts".to_string(), "root"),
                ("petstore/a.d.ts".to_string(), "a"),
                ("petstore/b.d.ts".to_string(), "b"),
            ]
        );
        assert_eq!(tree.file("petstore/a.d.ts"), Some("a"));
        assert_eq!(tree.file("petstore"), None);
        assert_eq!(tree.file("missing/x"), None);
    }
}
