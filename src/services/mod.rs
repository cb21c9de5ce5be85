//! Service layer for branchview
//!
//! This module contains the stateful and subprocess-facing pieces: the git
//! process invoker, repository resolution and its persistent cache, change-set
//! construction, tree materialization, and revision content retrieval, plus
//! the workspace service that orchestrates them per refresh.

pub mod cache;
pub mod changeset;
pub mod invoker;
pub mod resolver;
pub mod revision;
pub mod status;
pub mod tree;
pub mod workspace;

pub use cache::RepoInfoCache;
pub use changeset::{ChangeSetBuilder, ChangeSetOutcome};
pub use invoker::{GitCli, ProcessRunner};
pub use resolver::RepositoryResolver;
pub use revision::RevisionFetcher;
pub use tree::ParentIndex;
pub use workspace::{RefreshOutcome, WorkspaceService};
