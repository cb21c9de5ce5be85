//! Shared utilities

pub mod command;

pub use command::create_command;
