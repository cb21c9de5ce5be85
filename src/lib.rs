//! Branchview - changed-file tree for editor sidebars
//!
//! For each configured repository, branchview determines the current branch,
//! computes the commit on the default branch the branch diverged from, gathers
//! every path that differs from that baseline (uncommitted working-tree changes
//! plus changes committed on the branch), and materializes the result as a
//! lazily-expanded directory/file tree. On top of the tree it offers diff
//! content retrieval at arbitrary revisions, rename/delete/rollback file
//! operations, and configurable multi-step shell workflows.
//!
//! The editor host (tree widget, terminals, prompts, notifications) is an
//! external collaborator: everything here returns plain data for the host to
//! render, and all git access goes through the `git` executable as a
//! subprocess.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for host processes that embed branchview.
///
/// Respects `RUST_LOG`; defaults to debug-level output for this crate.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "branchview=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("branchview tracing initialized");
}
