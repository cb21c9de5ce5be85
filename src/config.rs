//! Settings surface
//!
//! The host owns the storage mechanism for settings; this module only defines
//! the shape and provides JSON load/save helpers for hosts that keep them in
//! a file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// Configuration consumed by the core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Repository paths to scan
    pub repositories: Vec<String>,
    /// Path to the version-control executable; resolved from the environment
    /// when unset
    pub git_executable: Option<String>,
    /// Named workflows: a list of command-line templates with
    /// `<<<PLACEHOLDER>>>` tokens
    pub custom_workflows: BTreeMap<String, Vec<String>>,
    /// Join workflow commands with `&&` in one terminal line instead of
    /// sending them one by one
    pub use_chaining_for_workflows: bool,
    /// Keep the tree selection in sync with the active editor
    pub sync_file_selection: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            repositories: Vec::new(),
            git_executable: None,
            custom_workflows: BTreeMap::new(),
            use_chaining_for_workflows: true,
            sync_file_selection: true,
        }
    }
}

impl Settings {
    /// The git executable to invoke; falls back to resolving `git` from the
    /// environment
    pub fn git_path(&self) -> &str {
        match self.git_executable.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path,
            _ => "git",
        }
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
