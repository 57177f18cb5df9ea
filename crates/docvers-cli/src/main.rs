//! docvers CLI
//!
//! Command-line interface for versioned documentation builds

use clap::{Parser, Subcommand, ValueEnum};
use docvers_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "docvers")]
#[command(about = "docvers - Versioned documentation merge and changelog engine", long_about = None)]
struct Cli {
    /// Log output format (written to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand a document into one document per version
    Expand(commands::expand::ExpandArgs),
    /// Build the changelog across versions of API content
    Changelog(commands::changelog::ChangelogArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format.into());

    let result = match cli.command {
        Commands::Expand(args) => commands::expand::execute(args),
        Commands::Changelog(args) => commands::changelog::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
