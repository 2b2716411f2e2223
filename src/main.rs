//! formsync - submit forms the way a page would
//!
//! CLI binary that drives the form submission mediator against a live
//! server and prints the reconciled state.

use anyhow::Result;
use clap::{Parser, Subcommand};
use formsync::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "formsync")]
#[command(about = "Submit forms as JSON requests and show the reconciled page state")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log protocol steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a form from the given page location
    Submit(cli::SubmitArgs),

    /// Show the effective configuration
    Config,
}

// Submission failures are printed by the CLI observer, so the mediator's
// own error events stay quiet unless asked for.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "formsync=debug"
    } else {
        "warn,formsync::mediator=off"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Submit(args) => {
            if !cli::run_submit(args, config).await? {
                std::process::exit(1);
            }
        }
        Commands::Config => {
            cli::run_config(&config)?;
        }
    }

    Ok(())
}
