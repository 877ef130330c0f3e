//! chart-credentials - extract connection credentials from Helm release notes
//!
//! Diagnostic front end for the library: runs an extractor against a notes
//! file (or stdin) and prints the resulting credential record.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{ConfigSubcommand, ExtractArgs};

/// Extract connection credentials from Helm release notes
#[derive(Parser, Debug)]
#[command(name = "chart-credentials")]
#[command(version, about = "Extract connection credentials from Helm release notes", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Extract credentials for a chart and print them as JSON
    Extract(ExtractArgs),
    /// List charts with a registered extractor
    Charts,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logging(args.debug);

    match args.command {
        Command::Extract(extract) => cli::handle_extract(extract).await,
        Command::Charts => cli::handle_charts(),
        Command::Config { subcommand } => cli::handle_config_command(subcommand),
    }
}
