//! Data models for branchview

pub mod change;
pub mod repository;
pub mod tree;

pub use change::*;
pub use repository::*;
pub use tree::*;
