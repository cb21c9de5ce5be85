//! Tree node models
//!
//! Nodes are plain data the host renders however it likes; there is no
//! subclassing of host tree-item types and no live parent references. The
//! flat [`FileEntry`](super::FileEntry) list is the cache, the tree is a view
//! over it, materialized one level at a time.

use serde::{Deserialize, Serialize};

use super::ChangeKind;

/// Variant of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Repository,
    Directory,
    File,
}

/// One node of the changed-file tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Display label (basename, or `"name - branch"` for repositories)
    pub label: String,
    /// Repo-relative path, `/`-separated; the repository path itself for
    /// repository nodes
    pub path: String,
    /// Owning repository identifier (its configured path)
    pub repo: String,
    pub kind: NodeKind,
    /// Meaningful for file nodes; `Unknown` otherwise
    pub change: ChangeKind,
    /// Path segments from the repository root to this directory; empty for
    /// repository and file nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
}

impl TreeNode {
    pub fn repository(repo: &str, label: String) -> Self {
        TreeNode {
            label,
            path: repo.to_string(),
            repo: repo.to_string(),
            kind: NodeKind::Repository,
            change: ChangeKind::Unknown,
            segments: Vec::new(),
        }
    }

    pub fn directory(repo: &str, path: &str, segments: Vec<String>) -> Self {
        let label = segments.last().cloned().unwrap_or_else(|| path.to_string());
        TreeNode {
            label,
            path: path.to_string(),
            repo: repo.to_string(),
            kind: NodeKind::Directory,
            change: ChangeKind::Unknown,
            segments,
        }
    }

    pub fn file(repo: &str, path: &str, label: &str, change: ChangeKind) -> Self {
        TreeNode {
            label: label.to_string(),
            path: path.to_string(),
            repo: repo.to_string(),
            kind: NodeKind::File,
            change,
            segments: Vec::new(),
        }
    }

    /// Whether the host should render this node as expandable
    pub fn is_expandable(&self) -> bool {
        self.kind != NodeKind::File
    }

    /// Stable identifier within one refresh cycle, used by the parent lookup
    /// table
    pub fn id(&self) -> String {
        format!("{}::{}::{:?}", self.repo, self.path, self.kind)
    }
}

/// Equality used for de-duplication, not identity
impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.repo == other.repo
            && self.path == other.path
            && self.kind == other.kind
            && self.label == other.label
    }
}

impl Eq for TreeNode {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_change_kind() {
        let a = TreeNode::file("/repo", "src/a.rs", "a.rs", ChangeKind::Modified);
        let b = TreeNode::file("/repo", "src/a.rs", "a.rs", ChangeKind::Added);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_distinguishes_variant() {
        let file = TreeNode::file("/repo", "src", "src", ChangeKind::Unknown);
        let dir = TreeNode::directory("/repo", "src", vec!["src".to_string()]);
        assert_ne!(file, dir);
    }

    #[test]
    fn test_only_files_are_leaves() {
        let repo = TreeNode::repository("/repo", "repo - main".to_string());
        let dir = TreeNode::directory("/repo", "src", vec!["src".to_string()]);
        let file = TreeNode::file("/repo", "src/a.rs", "a.rs", ChangeKind::Added);
        assert!(repo.is_expandable());
        assert!(dir.is_expandable());
        assert!(!file.is_expandable());
    }

    #[test]
    fn test_directory_label_is_last_segment() {
        let dir = TreeNode::directory(
            "/repo",
            "src/nested",
            vec!["src".to_string(), "nested".to_string()],
        );
        assert_eq!(dir.label, "nested");
    }
}
