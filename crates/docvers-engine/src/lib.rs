//! docvers Engine - Orchestration layer
//!
//! Loads documents, API content and options from disk, runs the core
//! operations and owns boundary logging for them.

pub mod commands;
pub mod config;

pub use commands::changelog::{changelog_command, ChangelogOutcome, ChangelogRequest};
pub use commands::expand::{expand_command, ExpandOutcome, ExpandRequest};

/// Result type of engine commands
pub type Result<T> = std::result::Result<T, docvers_core::ExError>;
