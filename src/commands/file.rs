//! File operation command handlers
//! Rename, delete, and rollback for file nodes. Destructive confirmation
//! prompts are the host's job; these functions assume consent was given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{BranchviewError, Result};
use crate::models::{NodeKind, TreeNode};
use crate::services::invoker::ProcessRunner;

fn require_present_file(node: &TreeNode, action: &str) -> Result<PathBuf> {
    if node.kind != NodeKind::File {
        return Err(BranchviewError::InvalidPath(node.path.clone()));
    }
    if node.change.is_deleted() {
        return Err(BranchviewError::OperationFailed(format!(
            "Cannot {action} a deleted file"
        )));
    }
    Ok(Path::new(&node.repo).join(&node.path))
}

/// Rename a file node's file on disk.
///
/// Refuses empty or unchanged names and never overwrites an existing target.
/// Returns the new absolute path so the host can reopen the editor on it.
pub fn rename_file(node: &TreeNode, new_name: &str) -> Result<PathBuf> {
    let old_path = require_present_file(node, "rename")?;

    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(BranchviewError::OperationFailed(
            "Name cannot be empty".to_string(),
        ));
    }
    if new_name == node.label {
        return Err(BranchviewError::OperationFailed(
            "Please enter a new name".to_string(),
        ));
    }

    let new_path = old_path
        .parent()
        .map(|parent| parent.join(new_name))
        .ok_or_else(|| BranchviewError::InvalidPath(node.path.clone()))?;
    if new_path.exists() {
        return Err(BranchviewError::OperationFailed(format!(
            "Target file already exists: \"{}\"! Rename aborted.",
            new_path.display()
        )));
    }

    std::fs::rename(&old_path, &new_path)?;
    tracing::info!(from = %old_path.display(), to = %new_path.display(), "file renamed");
    Ok(new_path)
}

/// Delete a file node's file from disk
pub fn delete_file(node: &TreeNode) -> Result<()> {
    let path = require_present_file(node, "delete")?;
    std::fs::remove_file(&path)?;
    tracing::info!(path = %path.display(), "file deleted");
    Ok(())
}

/// Roll a file back to its state at the latest commit
pub async fn rollback_file(
    runner: &Arc<dyn ProcessRunner>,
    git_path: &str,
    node: &TreeNode,
) -> Result<()> {
    if node.kind != NodeKind::File {
        return Err(BranchviewError::InvalidPath(node.path.clone()));
    }
    runner
        .run(
            git_path,
            &["checkout", "HEAD", "--", &node.path],
            Path::new(&node.repo),
        )
        .await?;
    tracing::info!(repo = node.repo.as_str(), path = node.path.as_str(), "file rolled back");
    Ok(())
}
