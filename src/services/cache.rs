//! Persistent per-repository resolution cache
//!
//! Maps a repository path to its [`RepositoryInfo`] (default branch plus one
//! origin commit per visited branch). Persisted as a single JSON document so
//! resolution survives host restarts; a missing or unreadable store simply
//! loads as empty, which the resolver treats as "not yet computed".

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BranchviewError, Result};
use crate::models::RepositoryInfo;

const STORE_FILE: &str = "repository_info.json";

/// Cache of repository resolution state with explicit load/save/reset
pub struct RepoInfoCache {
    entries: RwLock<HashMap<String, RepositoryInfo>>,
    store_path: Option<PathBuf>,
}

impl RepoInfoCache {
    /// Cache persisted at the default location under the user cache directory
    pub fn open_default() -> Self {
        let store_path = dirs::cache_dir().map(|dir| dir.join("branchview").join(STORE_FILE));
        match store_path {
            Some(path) => Self::load(path),
            None => {
                tracing::warn!("no user cache directory, repository info will not persist");
                Self::in_memory()
            }
        }
    }

    /// Cache persisted at an explicit path, loading whatever is already there
    pub fn load(store_path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&store_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(
                        path = %store_path.display(),
                        %err,
                        "unreadable repository info store, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        RepoInfoCache {
            entries: RwLock::new(entries),
            store_path: Some(store_path),
        }
    }

    /// Cache that never touches disk (tests, hosts with their own store)
    pub fn in_memory() -> Self {
        RepoInfoCache {
            entries: RwLock::new(HashMap::new()),
            store_path: None,
        }
    }

    /// Snapshot of one repository's cached info
    pub fn get(&self, repo: &str) -> Result<Option<RepositoryInfo>> {
        let entries = self.read_entries()?;
        Ok(entries.get(repo).cloned())
    }

    /// Cached default branch for a repository, if already computed.
    ///
    /// An entry created by [`set_branch_origin`](Self::set_branch_origin)
    /// alone holds an empty default branch; that counts as not computed.
    pub fn default_branch(&self, repo: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(repo)
            .map(|info| info.default_branch.clone())
            .filter(|name| !name.is_empty()))
    }

    /// Cached origin commit for a branch, if already computed
    pub fn branch_origin(&self, repo: &str, branch: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(repo)
            .and_then(|info| info.branches.get(branch).cloned()))
    }

    /// Record the default branch, creating the repository entry if needed
    pub fn set_default_branch(&self, repo: &str, default_branch: &str) -> Result<()> {
        {
            let mut entries = self.write_entries()?;
            entries
                .entry(repo.to_string())
                .or_insert_with(|| RepositoryInfo::new(default_branch.to_string()))
                .default_branch = default_branch.to_string();
        }
        self.save()
    }

    /// Record a branch's origin commit.
    ///
    /// Last-write-wins: a concurrent duplicate computation writes the same
    /// deterministic value, so the race is benign.
    pub fn set_branch_origin(&self, repo: &str, branch: &str, origin: &str) -> Result<()> {
        {
            let mut entries = self.write_entries()?;
            entries
                .entry(repo.to_string())
                .or_insert_with(|| RepositoryInfo::new(String::new()))
                .branches
                .insert(branch.to_string(), origin.to_string());
        }
        self.save()
    }

    /// Drop every cached entry and persist the empty state
    pub fn reset(&self) -> Result<()> {
        {
            let mut entries = self.write_entries()?;
            entries.clear();
        }
        self.save()
    }

    /// Persist the current state to the store path, if any
    pub fn save(&self) -> Result<()> {
        let Some(store_path) = &self.store_path else {
            return Ok(());
        };
        let content = {
            let entries = self.read_entries()?;
            serde_json::to_string_pretty(&*entries)?
        };
        if let Some(parent) = store_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(store_path, content)?;
        Ok(())
    }

    fn read_entries(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, RepositoryInfo>>> {
        self.entries
            .read()
            .map_err(|_| BranchviewError::OperationFailed("Lock poisoned".to_string()))
    }

    fn write_entries(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, RepositoryInfo>>> {
        self.entries
            .write()
            .map_err(|_| BranchviewError::OperationFailed("Lock poisoned".to_string()))
    }
}
