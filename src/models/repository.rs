//! Repository models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ErrorResponse;

/// Cached resolution state for one repository
///
/// The default branch name is computed once for the repository's lifetime.
/// Each branch's origin commit is computed once per branch name and then
/// treated as immutable until the cache is explicitly reset; the origin is
/// expensive to compute and assumed stable for a branch's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    pub default_branch: String,
    /// Branch name to origin commit id
    #[serde(default)]
    pub branches: HashMap<String, String>,
}

impl RepositoryInfo {
    pub fn new(default_branch: String) -> Self {
        RepositoryInfo {
            default_branch,
            branches: HashMap::new(),
        }
    }
}

/// A failure scoped to one repository or one of its subprocess calls.
///
/// Issues are collected instead of propagated so that one failing repository
/// (or one failing call within a repository) never aborts the rest of a
/// refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryIssue {
    /// Configured repository path the issue belongs to
    pub repo: String,
    pub error: ErrorResponse,
}

impl RepositoryIssue {
    pub fn new(repo: &str, error: impl Into<ErrorResponse>) -> Self {
        RepositoryIssue {
            repo: repo.to_string(),
            error: error.into(),
        }
    }
}
