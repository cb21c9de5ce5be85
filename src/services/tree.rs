//! Tree materialization
//!
//! Turns the flat, sorted file-entry list of a repository into directory and
//! file nodes one level at a time, as the host asks for children. Nothing is
//! cached here; the flat list is the cache and these functions are pure views
//! over it.

use std::collections::HashMap;

use crate::models::{FileEntry, NodeKind, TreeNode};

/// Direct children of a repository node: files at the repository root plus
/// one directory node per distinct top-level path segment, first-seen order.
pub fn children_of_repository(repo_id: &str, entries: &[FileEntry]) -> Vec<TreeNode> {
    let mut children: Vec<TreeNode> = Vec::new();

    for entry in entries {
        match entry.path.split_once('/') {
            Some((top, _)) => {
                let exists = children
                    .iter()
                    .any(|node| node.kind == NodeKind::Directory && node.label == top);
                if !exists {
                    children.push(TreeNode::directory(repo_id, top, vec![top.to_string()]));
                }
            }
            None => {
                children.push(TreeNode::file(repo_id, &entry.path, &entry.label, entry.kind));
            }
        }
    }

    children
}

/// Direct children of a directory node.
///
/// Entries under the directory's segment prefix either carry a further
/// separator (folded into one directory node per next segment) or become file
/// nodes carrying their change kind.
pub fn children_of_directory(dir: &TreeNode, entries: &[FileEntry]) -> Vec<TreeNode> {
    let prefix = format!("{}/", dir.segments.join("/"));
    let mut children: Vec<TreeNode> = Vec::new();

    for entry in entries {
        let Some(rest) = entry.path.strip_prefix(&prefix) else {
            continue;
        };

        match rest.split_once('/') {
            Some((top, _)) => {
                let exists = children
                    .iter()
                    .any(|node| node.kind == NodeKind::Directory && node.label == top);
                if !exists {
                    let mut segments = dir.segments.clone();
                    segments.push(top.to_string());
                    let dir_path = segments.join("/");
                    children.push(TreeNode::directory(&dir.repo, &dir_path, segments));
                }
            }
            None => {
                children.push(TreeNode::file(&dir.repo, &entry.path, &entry.label, entry.kind));
            }
        }
    }

    children
}

/// Child-to-parent lookup for reveal-to-root traversal.
///
/// Kept as an id table rather than live parent references so discarding a
/// subtree never retains stale nodes.
#[derive(Debug, Default)]
pub struct ParentIndex {
    parents: HashMap<String, TreeNode>,
}

impl ParentIndex {
    pub fn new() -> Self {
        ParentIndex::default()
    }

    /// Record `parent` as the parent of each node in `children`
    pub fn record(&mut self, parent: &TreeNode, children: &[TreeNode]) {
        for child in children {
            self.parents.insert(child.id(), parent.clone());
        }
    }

    pub fn parent_of(&self, node: &TreeNode) -> Option<&TreeNode> {
        if node.kind == NodeKind::Repository {
            return None;
        }
        self.parents.get(&node.id())
    }

    /// Nodes from `node` (exclusive) up to its repository node
    pub fn path_to_root(&self, node: &TreeNode) -> Vec<TreeNode> {
        let mut chain = Vec::new();
        let mut current = node.clone();
        while let Some(parent) = self.parent_of(&current) {
            chain.push(parent.clone());
            current = parent.clone();
        }
        chain
    }

    pub fn clear(&mut self) {
        self.parents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChangeKind;

    fn entries(repo: &str, paths: &[(&str, ChangeKind)]) -> Vec<FileEntry> {
        let mut list: Vec<FileEntry> = paths
            .iter()
            .map(|(path, kind)| FileEntry::new(repo, path, *kind))
            .collect();
        list.sort_by(|a, b| a.path.cmp(&b.path));
        list
    }

    #[test]
    fn test_reconstructs_expected_shape() {
        let flat = entries(
            "/repo",
            &[
                ("src/a.ts", ChangeKind::Modified),
                ("src/b.ts", ChangeKind::Added),
                ("README.md", ChangeKind::Untracked),
            ],
        );

        let roots = children_of_repository("/repo", &flat);
        assert_eq!(roots.len(), 2);

        let readme = roots.iter().find(|n| n.label == "README.md").unwrap();
        assert_eq!(readme.kind, NodeKind::File);
        assert_eq!(readme.change, ChangeKind::Untracked);

        let src = roots.iter().find(|n| n.label == "src").unwrap();
        assert_eq!(src.kind, NodeKind::Directory);

        let src_children = children_of_directory(src, &flat);
        let labels: Vec<&str> = src_children.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["a.ts", "b.ts"]);
        assert!(src_children.iter().all(|n| n.kind == NodeKind::File));
    }

    #[test]
    fn test_directories_are_not_duplicated() {
        let flat = entries(
            "/repo",
            &[
                ("src/a.rs", ChangeKind::Modified),
                ("src/b.rs", ChangeKind::Modified),
                ("src/nested/c.rs", ChangeKind::Added),
            ],
        );
        let roots = children_of_repository("/repo", &flat);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].label, "src");
    }

    #[test]
    fn test_nested_directories_expand_level_by_level() {
        let flat = entries(
            "/repo",
            &[
                ("src/nested/deep/d.rs", ChangeKind::Added),
                ("src/nested/c.rs", ChangeKind::Modified),
            ],
        );
        let roots = children_of_repository("/repo", &flat);
        let src = &roots[0];

        let level_one = children_of_directory(src, &flat);
        assert_eq!(level_one.len(), 1);
        let nested = &level_one[0];
        assert_eq!(nested.label, "nested");
        assert_eq!(nested.segments, vec!["src", "nested"]);

        let level_two = children_of_directory(nested, &flat);
        let mut labels: Vec<&str> = level_two.iter().map(|n| n.label.as_str()).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["c.rs", "deep"]);
    }

    #[test]
    fn test_prefix_matching_is_segment_aware() {
        // "src-extra/x.rs" must not appear under "src/".
        let flat = entries(
            "/repo",
            &[
                ("src/a.rs", ChangeKind::Modified),
                ("src-extra/x.rs", ChangeKind::Added),
            ],
        );
        let roots = children_of_repository("/repo", &flat);
        let src = roots.iter().find(|n| n.label == "src").unwrap();
        let children = children_of_directory(src, &flat);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].label, "a.rs");
    }

    #[test]
    fn test_directory_nodes_carry_their_own_path() {
        // A directory's path is the directory itself, not the file whose
        // entry first introduced it, so ids stay unique across levels.
        let flat = entries("/repo", &[("src/nested/c.rs", ChangeKind::Modified)]);
        let roots = children_of_repository("/repo", &flat);
        let src = &roots[0];
        assert_eq!(src.path, "src");

        let nested = &children_of_directory(src, &flat)[0];
        assert_eq!(nested.path, "src/nested");
        assert_ne!(src.id(), nested.id());
    }

    #[test]
    fn test_parent_index_reveals_path_to_root() {
        let flat = entries("/repo", &[("src/nested/c.rs", ChangeKind::Modified)]);
        let repo_node = TreeNode::repository("/repo", "repo - main".to_string());

        let mut index = ParentIndex::new();
        let roots = children_of_repository("/repo", &flat);
        index.record(&repo_node, &roots);
        let nested = children_of_directory(&roots[0], &flat);
        index.record(&roots[0], &nested);
        let files = children_of_directory(&nested[0], &flat);
        index.record(&nested[0], &files);

        let chain = index.path_to_root(&files[0]);
        let labels: Vec<&str> = chain.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["nested", "src", "repo - main"]);
        assert!(index.parent_of(&repo_node).is_none());
    }
}
