//! Changelog command
//!
//! Usage: docvers changelog <VERSIONS_JSON> [--config <FILE>] [--output <FILE>] [--summary]

use clap::Args;
use docvers_engine::config::to_json;
use docvers_engine::{changelog_command, ChangelogRequest};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// JSON list of `{"version": ..., "content": [...]}` records, oldest first
    pub versions: PathBuf,

    /// Options file (TOML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a plain-text summary instead of changelog entities
    #[arg(long)]
    pub summary: bool,
}

/// Execute changelog command
pub fn execute(args: ChangelogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = changelog_command(&ChangelogRequest {
        versions: args.versions,
        options: args.config,
    })?;

    let text = if args.summary {
        outcome.summary()
    } else {
        to_json(&outcome.entities())?
    };

    super::emit(args.output.as_deref(), &text)
}
