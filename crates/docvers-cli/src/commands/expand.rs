//! Expand command
//!
//! Usage: docvers expand <DOCUMENT> [--config <FILE>] [--destination <PATH>] [--output <FILE>]

use clap::Args;
use docvers_engine::config::to_json;
use docvers_engine::{expand_command, ExpandRequest};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// JSON document containing `version` entities
    pub document: PathBuf,

    /// Options file (TOML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Destination overriding the one recorded in the document
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute expand command
pub fn execute(args: ExpandArgs) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = expand_command(&ExpandRequest {
        document: args.document,
        options: args.config,
        destination: args.destination,
    })?;

    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }

    super::emit(args.output.as_deref(), &to_json(&outcome.documents)?)
}
