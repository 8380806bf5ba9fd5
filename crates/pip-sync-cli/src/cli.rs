//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tox-pip-sync - Keep a virtualenv exactly in line with its requirements
#[derive(Parser, Debug)]
#[command(name = "tox-pip-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// What to sync: the project and its declared dependencies
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Project root that requirement files are resolved against
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// A dependency declaration, e.g. `requests`, `-r requirements.txt`
    /// or `-e .` (repeatable, in order)
    #[arg(long = "dep", value_name = "DEP", allow_hyphen_values = true)]
    pub deps: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compile and sync the environment when its requirements changed
    Sync {
        /// The virtualenv to sync
        #[arg(long)]
        env_dir: PathBuf,

        #[command(flatten)]
        target: Target,

        /// Sync even when the recorded fingerprint matches
        #[arg(long)]
        force: bool,
    },

    /// Remove generated requirements files from an environment
    Clean {
        /// The virtualenv to clean
        #[arg(long)]
        env_dir: PathBuf,
    },

    /// Print the fingerprint of the declared dependencies
    Hash {
        #[command(flatten)]
        target: Target,
    },

    /// Report whether the environment needs syncing
    Status {
        /// The virtualenv to inspect
        #[arg(long)]
        env_dir: PathBuf,

        #[command(flatten)]
        target: Target,
    },
}
