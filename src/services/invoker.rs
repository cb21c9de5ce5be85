//! Subprocess invocation for the version-control executable
//!
//! Every git query in the crate goes through [`ProcessRunner`], so tests can
//! substitute a scripted runner and the rest of the code never touches
//! `std::process` directly. Failures are structured, never retried; callers
//! decide user-visible messaging.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{BranchviewError, Result};
use crate::utils::create_command;

/// Runs an executable with arguments in a working directory and returns its
/// standard output as text
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String>;
}

/// [`ProcessRunner`] backed by the real command-line tool
#[derive(Debug, Default, Clone)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        GitCli
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

#[async_trait]
impl ProcessRunner for GitCli {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<String> {
        let mut cmd = create_command(program);
        cmd.args(args).current_dir(cwd);

        let output = cmd.output().await.map_err(|source| BranchviewError::CommandSpawn {
            command: display_command(program, args),
            dir: cwd.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(
                command = %display_command(program, args),
                dir = %cwd.display(),
                code = ?output.status.code(),
                "git command failed"
            );
            return Err(BranchviewError::command_failed(
                display_command(program, args),
                cwd,
                output.status.code(),
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
