//! Host-callable operations
//!
//! Thin async functions the editor host wires its commands to. They return
//! plain data (diff content pairs, resolved workflow runs, new paths); all
//! prompting, confirmation dialogs, and rendering stay on the host side.

pub mod diff;
pub mod file;
pub mod workflow;
