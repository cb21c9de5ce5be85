//! Diff command handlers
//! Produce the two content sides of a diff for a changed file: the revision
//! side (HEAD or the branch-origin commit) and the working-tree side.

use std::path::Path;

use crate::error::{BranchviewError, Result};
use crate::models::{NodeKind, TreeNode};
use crate::services::resolver::RepositoryResolver;
use crate::services::revision::RevisionFetcher;

/// Content pair for a two-pane diff
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    pub title: String,
    /// Content at the comparison revision; rendered read-only by hosts
    pub old_content: String,
    /// Current working-tree content; empty for deleted files
    pub new_content: String,
    pub revision: String,
}

/// Diff a file node against the latest commit
pub async fn diff_against_head(fetcher: &RevisionFetcher, node: &TreeNode) -> Result<FileDiff> {
    let title = format!("{} (latest commit)  ↔  {}", node.label, node.label);
    build_diff(fetcher, node, "HEAD", title).await
}

/// Diff a file node against the commit its branch diverged from the default
/// branch at
pub async fn diff_against_branch_origin(
    resolver: &RepositoryResolver,
    fetcher: &RevisionFetcher,
    node: &TreeNode,
) -> Result<FileDiff> {
    let repo = Path::new(&node.repo);
    let branch = resolver.current_branch(repo).await?;
    let origin = resolver.branch_origin(repo, &branch).await?.ok_or_else(|| {
        BranchviewError::OperationFailed(format!(
            "'{branch}' is the default branch, there is no branch origin to diff against"
        ))
    })?;

    let title = format!("{} (branch-origin)  ↔  {}", node.label, node.label);
    build_diff(fetcher, node, &origin, title).await
}

async fn build_diff(
    fetcher: &RevisionFetcher,
    node: &TreeNode,
    revision: &str,
    title: String,
) -> Result<FileDiff> {
    if node.kind != NodeKind::File {
        return Err(BranchviewError::InvalidPath(node.path.clone()));
    }

    let repo = Path::new(&node.repo);
    let old_content = fetcher.content_at(repo, &node.path, revision).await?;

    // Deleted files diff against an empty right-hand side.
    let new_content = if node.change.is_deleted() {
        String::new()
    } else {
        let abs = repo.join(&node.path);
        // Decode lossily so files with stray non-UTF-8 bytes still diff.
        let bytes = std::fs::read(&abs)?;
        String::from_utf8_lossy(&bytes).into_owned()
    };

    Ok(FileDiff {
        title,
        old_content,
        new_content,
        revision: revision.to_string(),
    })
}
