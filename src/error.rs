//! Error types for branchview

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum BranchviewError {
    #[error("Command failed ('{command}' in {dir}): {stderr}")]
    CommandFailed {
        command: String,
        dir: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Could not start '{command}' in {dir}: {source}")]
    CommandSpawn {
        command: String,
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("'{path}' did not exist at revision {revision}")]
    NotFoundAtRevision { path: String, revision: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl BranchviewError {
    /// Stable machine-readable code for the host boundary
    pub fn code(&self) -> &'static str {
        match self {
            BranchviewError::CommandFailed { .. } => "COMMAND_FAILED",
            BranchviewError::CommandSpawn { .. } => "COMMAND_SPAWN",
            BranchviewError::RepositoryNotFound(_) => "REPO_NOT_FOUND",
            BranchviewError::NotFoundAtRevision { .. } => "NOT_FOUND_AT_REVISION",
            BranchviewError::InvalidPath(_) => "INVALID_PATH",
            BranchviewError::Io(_) => "IO_ERROR",
            BranchviewError::Serialization(_) => "SERIALIZATION_ERROR",
            BranchviewError::OperationFailed(_) => "OPERATION_FAILED",
        }
    }

    /// Errors that hosts should present as information, not alarm.
    ///
    /// A revision miss is an expected outcome (e.g. a file added after the
    /// revision being diffed against).
    pub fn is_informational(&self) -> bool {
        matches!(self, BranchviewError::NotFoundAtRevision { .. })
    }

    pub(crate) fn command_failed(
        command: impl Into<String>,
        dir: &Path,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        BranchviewError::CommandFailed {
            command: command.into(),
            dir: dir.display().to_string(),
            exit_code,
            stderr: stderr.into(),
        }
    }
}

/// Serializable error response for the host boundary
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub informational: bool,
}

impl From<&BranchviewError> for ErrorResponse {
    fn from(error: &BranchviewError) -> Self {
        ErrorResponse {
            code: error.code().to_string(),
            message: error.to_string(),
            informational: error.is_informational(),
        }
    }
}

impl From<BranchviewError> for ErrorResponse {
    fn from(error: BranchviewError) -> Self {
        ErrorResponse::from(&error)
    }
}

/// Result type alias for branchview operations
pub type Result<T> = std::result::Result<T, BranchviewError>;
