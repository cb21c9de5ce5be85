//! Change-set construction
//!
//! Combines the working-tree status with the committed diff against the branch
//! origin into one deduplicated, ordinally sorted list of file entries. The
//! two subprocess calls are independent: they run concurrently and a failure
//! of one never cancels the other, because partial results are better than
//! none.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ChangeKind, FileEntry, RepositoryIssue};
use crate::services::invoker::ProcessRunner;
use crate::services::status::{output_lines, parse_line};

const STATUS_ARGS: [&str; 3] = ["status", "--untracked-files=all", "--porcelain"];

/// Result of one change-set build: the entries plus any per-call failures
#[derive(Debug, Default)]
pub struct ChangeSetOutcome {
    pub entries: Vec<FileEntry>,
    pub issues: Vec<RepositoryIssue>,
}

/// Builds the flat changed-path list for one repository
pub struct ChangeSetBuilder {
    runner: Arc<dyn ProcessRunner>,
    git_path: String,
}

impl ChangeSetBuilder {
    pub fn new(runner: Arc<dyn ProcessRunner>, git_path: &str) -> Self {
        ChangeSetBuilder {
            runner,
            git_path: git_path.to_string(),
        }
    }

    /// Build the change set for `repo`.
    ///
    /// `origin` is the branch-origin commit, or `None` when the current branch
    /// is the default branch, in which case no diff-to-origin call is issued
    /// and no committed entries can appear.
    pub async fn change_set(
        &self,
        repo: &Path,
        repo_id: &str,
        origin: Option<&str>,
    ) -> ChangeSetOutcome {
        let status_call = self.run_status(repo);
        let diff_call = self.run_origin_diff(repo, origin);
        let (status, diff) = tokio::join!(status_call, diff_call);

        let mut issues = Vec::new();
        let mut merged: HashMap<String, FileEntry> = HashMap::new();

        match status {
            Ok(output) => {
                for line in output_lines(&output) {
                    merge_entry(repo_id, line, &mut merged);
                }
            }
            Err(err) => {
                tracing::warn!(repo = repo_id, %err, "working-tree status failed");
                issues.push(RepositoryIssue::new(repo_id, err));
            }
        }

        match diff {
            Ok(Some(output)) => {
                // Tag each diff line so its prefix classifies as committed.
                for line in output_lines(&output) {
                    merge_entry(repo_id, &format!("C{line}"), &mut merged);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(repo = repo_id, %err, "diff against branch origin failed");
                issues.push(RepositoryIssue::new(repo_id, err));
            }
        }

        let mut entries: Vec<FileEntry> = merged.into_values().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        ChangeSetOutcome { entries, issues }
    }

    async fn run_status(&self, repo: &Path) -> Result<String> {
        self.runner.run(&self.git_path, &STATUS_ARGS, repo).await
    }

    async fn run_origin_diff(&self, repo: &Path, origin: Option<&str>) -> Result<Option<String>> {
        let Some(origin) = origin else {
            return Ok(None);
        };
        let output = self
            .runner
            .run(&self.git_path, &["diff", "--name-status", origin], repo)
            .await?;
        Ok(Some(output))
    }
}

fn merge_entry(repo_id: &str, line: &str, merged: &mut HashMap<String, FileEntry>) {
    let parsed = parse_line(line);
    let path = parsed.path.replace('\\', "/");
    match merged.get_mut(&path) {
        Some(existing) => {
            existing.kind = ChangeKind::resolve(existing.kind, parsed.kind);
        }
        None => {
            merged.insert(path.clone(), FileEntry::new(repo_id, &path, parsed.kind));
        }
    }
}
