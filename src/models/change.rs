//! Change classification models
//!
//! A path can be classified twice: once by the working-tree status and once by
//! the committed diff against the branch origin. Exactly one classification
//! survives per path, decided by a fixed priority order: uncommitted,
//! in-progress states dominate already-committed ones, and destructive states
//! dominate additive ones so the user notices risk first.

use serde::{Deserialize, Serialize};

/// Kind of change a file carries relative to the branch baseline
///
/// The `Committed*` variants mean the change exists in the diff between HEAD
/// and the branch-origin commit, as opposed to an uncommitted working-tree
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Unknown,
    CommittedModified,
    CommittedAdded,
    CommittedDeleted,
    Committed,
    Modified,
    Untracked,
    Added,
    Deleted,
}

impl ChangeKind {
    /// Map a raw status/diff prefix to a change kind.
    ///
    /// Diff-driven lines are tagged by the caller with a leading `C`, which is
    /// why the committed variants appear here as composite prefixes. Unmapped
    /// prefixes classify as [`ChangeKind::Unknown`].
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "??" => ChangeKind::Untracked,
            "M" => ChangeKind::Modified,
            "A" => ChangeKind::Added,
            "D" => ChangeKind::Deleted,
            "CM" => ChangeKind::CommittedModified,
            "CA" => ChangeKind::CommittedAdded,
            "CD" => ChangeKind::CommittedDeleted,
            "C" => ChangeKind::Committed,
            _ => ChangeKind::Unknown,
        }
    }

    /// Tie-break priority, lowest to highest
    pub fn priority(self) -> u8 {
        match self {
            ChangeKind::Unknown => 0,
            ChangeKind::CommittedModified => 1,
            ChangeKind::CommittedAdded => 2,
            ChangeKind::CommittedDeleted => 3,
            ChangeKind::Committed => 4,
            ChangeKind::Modified => 5,
            ChangeKind::Untracked => 6,
            ChangeKind::Added => 7,
            ChangeKind::Deleted => 8,
        }
    }

    /// Pick the classification that should survive when a path is classified
    /// twice. Ties keep the existing one.
    pub fn resolve(existing: Self, incoming: Self) -> Self {
        if incoming.priority() > existing.priority() {
            incoming
        } else {
            existing
        }
    }

    /// Whether the file no longer exists in the working tree
    pub fn is_deleted(self) -> bool {
        matches!(self, ChangeKind::Deleted | ChangeKind::CommittedDeleted)
    }
}

/// One changed path within a repository, before tree materialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Repo-relative path, `/`-separated
    pub path: String,
    /// Basename of the path
    pub label: String,
    pub kind: ChangeKind,
    /// Owning repository identifier (its configured path)
    pub repo: String,
}

impl FileEntry {
    pub fn new(repo: &str, path: &str, kind: ChangeKind) -> Self {
        let label = path.rsplit('/').next().unwrap_or(path).to_string();
        FileEntry {
            path: path.to_string(),
            label,
            kind,
            repo: repo.to_string(),
        }
    }
}
