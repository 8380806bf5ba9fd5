//! tox-pip-sync CLI
//!
//! Drives the pip-sync core against a virtualenv on disk, outside of tox.

mod cli;
mod commands;
mod error;
mod host;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            env_dir,
            target,
            force,
        } => commands::run_sync(&env_dir, &target, force),
        Commands::Clean { env_dir } => commands::run_clean(&env_dir),
        Commands::Hash { target } => commands::run_hash(&target),
        Commands::Status { env_dir, target } => commands::run_status(&env_dir, &target),
    }
}
