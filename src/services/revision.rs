//! File content retrieval at arbitrary revisions
//!
//! Used for two-pane diff display. A path that did not exist at the requested
//! revision is an expected outcome (newly added files), so it is classified
//! separately from real command failures.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{BranchviewError, Result};
use crate::services::invoker::ProcessRunner;

/// Retrieves file contents as of a given revision
pub struct RevisionFetcher {
    runner: Arc<dyn ProcessRunner>,
    git_path: String,
}

impl RevisionFetcher {
    pub fn new(runner: Arc<dyn ProcessRunner>, git_path: &str) -> Self {
        RevisionFetcher {
            runner,
            git_path: git_path.to_string(),
        }
    }

    /// Contents of `path` as of `revision`.
    ///
    /// `path` is repo-relative; backslashes are normalized to `/` since the
    /// object database only knows forward slashes.
    pub async fn content_at(&self, repo: &Path, path: &str, revision: &str) -> Result<String> {
        let normalized = path.replace('\\', "/");
        let spec = format!("{revision}:{normalized}");
        match self.runner.run(&self.git_path, &["show", &spec], repo).await {
            Ok(content) => Ok(content),
            Err(err) => Err(classify_miss(err, &normalized, revision)),
        }
    }

    /// Like [`content_at`](Self::content_at), but materialized into a kept
    /// temporary file the host can hand to its diff viewer. The caller owns
    /// the file and is responsible for deleting it.
    pub async fn temp_file_at(&self, repo: &Path, path: &str, revision: &str) -> Result<PathBuf> {
        let content = self.content_at(repo, path, revision).await?;

        let suffix = Path::new(path)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix("branchview-rev-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(content.as_bytes())?;
        let (_, kept) = file.keep().map_err(|err| err.error)?;
        Ok(kept)
    }
}

/// Distinguish "the path did not exist at that revision" from real failures.
///
/// git reports a revision miss on stderr as either `does not exist in` or
/// `exists on disk, but not in`.
fn classify_miss(err: BranchviewError, path: &str, revision: &str) -> BranchviewError {
    if let BranchviewError::CommandFailed { stderr, .. } = &err {
        if stderr.contains("does not exist in") || stderr.contains("exists on disk, but not in") {
            return BranchviewError::NotFoundAtRevision {
                path: path.to_string(),
                revision: revision.to_string(),
            };
        }
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::invoker::GitCli;
    use crate::test_utils::TestRepo;

    fn fetcher() -> RevisionFetcher {
        RevisionFetcher::new(Arc::new(GitCli::new()), "git")
    }

    #[tokio::test]
    async fn test_content_at_head() {
        let repo = TestRepo::with_initial_commit();
        let content = fetcher()
            .content_at(&repo.path, "README.md", "HEAD")
            .await
            .unwrap();
        assert_eq!(content.trim(), "# Test Repo");
    }

    #[tokio::test]
    async fn test_content_at_older_revision() {
        let repo = TestRepo::with_initial_commit();
        let first = repo.head_commit();
        repo.commit_file("README.md", "# Changed", "update readme");

        let content = fetcher()
            .content_at(&repo.path, "README.md", &first)
            .await
            .unwrap();
        assert_eq!(content.trim(), "# Test Repo");
    }

    #[tokio::test]
    async fn test_missing_path_is_a_revision_miss() {
        let repo = TestRepo::with_initial_commit();
        let err = fetcher()
            .content_at(&repo.path, "added-later.rs", "HEAD")
            .await
            .unwrap_err();
        assert!(
            matches!(err, BranchviewError::NotFoundAtRevision { .. }),
            "expected NotFoundAtRevision, got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_bad_revision_stays_a_command_error() {
        let repo = TestRepo::with_initial_commit();
        let err = fetcher()
            .content_at(&repo.path, "README.md", "not-a-revision")
            .await
            .unwrap_err();
        assert!(matches!(err, BranchviewError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_temp_file_holds_revision_content() {
        let repo = TestRepo::with_initial_commit();
        let temp = fetcher()
            .temp_file_at(&repo.path, "README.md", "HEAD")
            .await
            .unwrap();
        let content = std::fs::read_to_string(&temp).unwrap();
        assert_eq!(content.trim(), "# Test Repo");
        std::fs::remove_file(temp).unwrap();
    }
}
