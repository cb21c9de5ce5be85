//! Repository resolution: current branch, default branch, branch origin
//!
//! The branch origin is the commit on the default branch the current branch
//! most plausibly diverged from, found by intersecting first-parent histories.
//! Both the default branch name and each branch's origin are computed once and
//! then served from [`RepoInfoCache`] until an explicit reset.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{BranchviewError, Result};
use crate::services::cache::RepoInfoCache;
use crate::services::invoker::ProcessRunner;
use crate::services::status::output_lines;

const BRANCH_NAME_ARGS: [&str; 3] = ["name-rev", "--name-only", "HEAD"];
const DEFAULT_BRANCH_ARGS: [&str; 6] =
    ["branch", "-l", "main", "master", "--format", "%(refname:short)"];

/// Resolves branch state for repositories, caching expensive answers
pub struct RepositoryResolver {
    runner: Arc<dyn ProcessRunner>,
    cache: Arc<RepoInfoCache>,
    git_path: String,
}

impl RepositoryResolver {
    pub fn new(runner: Arc<dyn ProcessRunner>, cache: Arc<RepoInfoCache>, git_path: &str) -> Self {
        RepositoryResolver {
            runner,
            cache,
            git_path: git_path.to_string(),
        }
    }

    pub fn cache(&self) -> &RepoInfoCache {
        &self.cache
    }

    /// Name of the repository's designated main line.
    ///
    /// Detected as `main` or `master` if present, first match wins; falls back
    /// to the literal `main`. Computed once per repository.
    pub async fn default_branch_name(&self, repo: &Path) -> Result<String> {
        let repo_id = repo.display().to_string();
        if let Some(cached) = self.cache.default_branch(&repo_id)? {
            return Ok(cached);
        }

        let output = self
            .runner
            .run(&self.git_path, &DEFAULT_BRANCH_ARGS, repo)
            .await?;
        let default_branch = output_lines(&output)
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("main")
            .to_string();

        self.cache.set_default_branch(&repo_id, &default_branch)?;
        tracing::debug!(repo = %repo_id, default_branch, "default branch resolved");
        Ok(default_branch)
    }

    /// Name of the currently checked-out ref.
    ///
    /// A repository path missing on disk is reported as
    /// [`BranchviewError::RepositoryNotFound`] so callers can exclude it with
    /// a friendlier message; any other failure surfaces as a command error.
    pub async fn current_branch(&self, repo: &Path) -> Result<String> {
        match self.runner.run(&self.git_path, &BRANCH_NAME_ARGS, repo).await {
            Ok(output) => Ok(output.replace(['\r', '\n'], "")),
            Err(err) => {
                if !repo.exists() {
                    Err(BranchviewError::RepositoryNotFound(
                        repo.display().to_string(),
                    ))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Origin commit of `branch` relative to the default branch.
    ///
    /// Returns `None` when `branch` is the default branch itself; the whole
    /// repository is already "current" and no origin is needed. Otherwise the
    /// first commit in the branch's first-parent history that also appears in
    /// the default branch's first-parent history, which is the commit the
    /// branch was created from. Disjoint histories (e.g. shallow clones) fall
    /// back to a direct merge-base query.
    pub async fn branch_origin(&self, repo: &Path, branch: &str) -> Result<Option<String>> {
        let repo_id = repo.display().to_string();
        let default_branch = self.default_branch_name(repo).await?;
        if branch == default_branch {
            return Ok(None);
        }

        if let Some(cached) = self.cache.branch_origin(&repo_id, branch)? {
            return Ok(Some(cached));
        }

        let origin = self.compute_branch_origin(repo, branch, &default_branch).await?;
        self.cache.set_branch_origin(&repo_id, branch, &origin)?;
        tracing::debug!(repo = %repo_id, branch, origin, "branch origin resolved");
        Ok(Some(origin))
    }

    async fn compute_branch_origin(
        &self,
        repo: &Path,
        branch: &str,
        default_branch: &str,
    ) -> Result<String> {
        let branch_list = self
            .runner
            .run(
                &self.git_path,
                &["rev-list", "--first-parent", branch, "--"],
                repo,
            )
            .await?;
        let default_list = self
            .runner
            .run(
                &self.git_path,
                &["rev-list", "--first-parent", default_branch, "--"],
                repo,
            )
            .await?;

        let default_set: HashSet<&str> = output_lines(&default_list).collect();
        if let Some(origin) = output_lines(&branch_list).find(|commit| default_set.contains(commit))
        {
            return Ok(origin.to_string());
        }

        // Disjoint first-parent histories; ask git directly.
        let merge_base = self
            .runner
            .run(&self.git_path, &["merge-base", "HEAD", default_branch], repo)
            .await?;
        Ok(merge_base.trim().to_string())
    }
}
