//! Workspace orchestration
//!
//! Drives one refresh cycle: for every configured repository, resolve branch
//! state, build the flat change set, and hand out tree nodes level by level.
//! A failing repository is reported and excluded; it never aborts the others.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::config::Settings;
use crate::error::{BranchviewError, Result};
use crate::models::{FileEntry, NodeKind, RepositoryIssue, TreeNode};
use crate::services::cache::RepoInfoCache;
use crate::services::changeset::ChangeSetBuilder;
use crate::services::invoker::{GitCli, ProcessRunner};
use crate::services::resolver::RepositoryResolver;
use crate::services::tree;

/// Result of one refresh cycle
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    /// One node per successfully resolved repository
    pub repositories: Vec<TreeNode>,
    /// Everything that went wrong without aborting the refresh
    pub issues: Vec<RepositoryIssue>,
}

/// Orchestrates repository resolution, change sets, and tree expansion
pub struct WorkspaceService {
    resolver: RepositoryResolver,
    changes: ChangeSetBuilder,
    cache: Arc<RepoInfoCache>,
    /// Flat entry list per repository, filled on refresh, read on expansion
    data: RwLock<HashMap<String, Vec<FileEntry>>>,
}

impl WorkspaceService {
    pub fn new(settings: &Settings, cache: Arc<RepoInfoCache>) -> Self {
        Self::with_runner(Arc::new(GitCli::new()), settings, cache)
    }

    pub fn with_runner(
        runner: Arc<dyn ProcessRunner>,
        settings: &Settings,
        cache: Arc<RepoInfoCache>,
    ) -> Self {
        let git_path = settings.git_path();
        WorkspaceService {
            resolver: RepositoryResolver::new(Arc::clone(&runner), Arc::clone(&cache), git_path),
            changes: ChangeSetBuilder::new(runner, git_path),
            cache,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Recompute branch state and change sets for every configured repository.
    ///
    /// Returns the repository-level nodes; directory and file nodes are
    /// materialized on demand through [`children`](Self::children).
    pub async fn refresh(&self, repositories: &[String]) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();

        for repo_id in repositories {
            match self.refresh_repository(repo_id, &mut outcome.issues).await {
                Ok(node) => outcome.repositories.push(node),
                Err(err) => {
                    tracing::error!(repo = repo_id.as_str(), %err, "repository excluded from refresh");
                    outcome.issues.push(RepositoryIssue::new(repo_id, err));
                }
            }
        }

        outcome
    }

    async fn refresh_repository(
        &self,
        repo_id: &str,
        issues: &mut Vec<RepositoryIssue>,
    ) -> Result<TreeNode> {
        let repo = Path::new(repo_id);
        let branch = self.resolver.current_branch(repo).await?;
        let origin = self.resolver.branch_origin(repo, &branch).await?;

        let mut changes = self
            .changes
            .change_set(repo, repo_id, origin.as_deref())
            .await;
        issues.append(&mut changes.issues);

        {
            let mut data = self.write_data()?;
            data.insert(repo_id.to_string(), changes.entries);
        }

        let name = repo
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| repo_id.to_string());
        Ok(TreeNode::repository(repo_id, format!("{name} - {branch}")))
    }

    /// Direct children of a repository or directory node, from the flat list
    /// cached by the last refresh. File nodes have no children.
    pub fn children(&self, node: &TreeNode) -> Result<Vec<TreeNode>> {
        let data = self.read_data()?;
        let entries = data.get(&node.repo).map(Vec::as_slice).unwrap_or(&[]);
        Ok(match node.kind {
            NodeKind::Repository => tree::children_of_repository(&node.repo, entries),
            NodeKind::Directory => tree::children_of_directory(node, entries),
            NodeKind::File => Vec::new(),
        })
    }

    /// The flat change set of one repository, as of the last refresh
    pub fn entries(&self, repo_id: &str) -> Result<Vec<FileEntry>> {
        let data = self.read_data()?;
        Ok(data.get(repo_id).cloned().unwrap_or_default())
    }

    /// Clear all cached repository info so the next refresh re-queries the
    /// default branch and recomputes branch origins from scratch
    pub fn reset(&self) -> Result<()> {
        self.cache.reset()?;
        let mut data = self.write_data()?;
        data.clear();
        Ok(())
    }

    pub fn resolver(&self) -> &RepositoryResolver {
        &self.resolver
    }

    fn read_data(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<FileEntry>>>> {
        self.data
            .read()
            .map_err(|_| BranchviewError::OperationFailed("Lock poisoned".to_string()))
    }

    fn write_data(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<FileEntry>>>> {
        self.data
            .write()
            .map_err(|_| BranchviewError::OperationFailed("Lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChangeKind;
    use crate::test_utils::TestRepo;

    fn workspace() -> WorkspaceService {
        WorkspaceService::new(&Settings::default(), Arc::new(RepoInfoCache::in_memory()))
    }

    #[tokio::test]
    async fn test_refresh_labels_repository_with_branch() {
        let repo = TestRepo::with_initial_commit();
        let ws = workspace();
        let outcome = ws.refresh(&[repo.path_str()]).await;

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.repositories.len(), 1);
        let label = &outcome.repositories[0].label;
        assert!(label.ends_with(" - master"), "unexpected label {label}");
    }

    #[tokio::test]
    async fn test_missing_repository_excluded_without_aborting_others() {
        let repo = TestRepo::with_initial_commit();
        let ws = workspace();
        let outcome = ws
            .refresh(&["/nowhere/missing".to_string(), repo.path_str()])
            .await;

        assert_eq!(outcome.repositories.len(), 1);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].error.code, "REPO_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_children_walk_from_repository_node() {
        let repo = TestRepo::with_initial_commit();
        repo.write_file("src/lib.rs", "pub fn a() {}");
        repo.write_file("notes.txt", "untracked");

        let ws = workspace();
        let outcome = ws.refresh(&[repo.path_str()]).await;
        let repo_node = &outcome.repositories[0];

        let roots = ws.children(repo_node).unwrap();
        let labels: Vec<&str> = roots.iter().map(|n| n.label.as_str()).collect();
        assert!(labels.contains(&"notes.txt"));
        assert!(labels.contains(&"src"));

        let src = roots.iter().find(|n| n.label == "src").unwrap();
        let files = ws.children(src).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].label, "lib.rs");
        assert_eq!(files[0].change, ChangeKind::Untracked);
        assert!(ws.children(&files[0]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feature_branch_shows_committed_changes() {
        let repo = TestRepo::with_initial_commit();
        repo.checkout_new_branch("feature/widget");
        repo.commit_file("src/widget.rs", "pub struct Widget;", "add widget");

        let ws = workspace();
        let outcome = ws.refresh(&[repo.path_str()]).await;
        assert!(outcome.issues.is_empty());

        let entries = ws.entries(&repo.path_str()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "src/widget.rs");
        assert_eq!(entries[0].kind, ChangeKind::CommittedAdded);
    }

    #[tokio::test]
    async fn test_default_branch_has_no_committed_entries() {
        let repo = TestRepo::with_initial_commit();
        repo.write_file("README.md", "# changed");

        let ws = workspace();
        ws.refresh(&[repo.path_str()]).await;
        let entries = ws.entries(&repo.path_str()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ChangeKind::Modified);
    }
}
