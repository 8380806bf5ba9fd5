//! Sync and clean command implementations

use std::path::Path;

use colored::Colorize;

use pip_sync_core::{
    Plugin, SyncOptions, SyncOutcome, Synchronizer, TracingReporter, clear_compiled_files,
};

use crate::cli::Target;
use crate::error::{CliError, Result};
use crate::host::LocalEnvironment;

/// Run the sync command
///
/// Loads the project's configuration, then compiles and syncs the
/// environment unless its fingerprint is unchanged (or `force` is set).
pub fn run_sync(env_dir: &Path, target: &Target, force: bool) -> Result<()> {
    ensure_env_dir(env_dir)?;
    let env = LocalEnvironment::new(env_dir, target)?;
    let plugin = Plugin::configure(&target.project_root)?;

    let options = SyncOptions {
        skip_on_hash_match: !force,
        ..plugin.sync_options()
    };
    let reporter = TracingReporter;
    let outcome = Synchronizer::new(&env, &reporter)
        .with_options(options)
        .sync()?;

    match outcome {
        SyncOutcome::Skipped { hash } => {
            println!(
                "{} Requirements unchanged ({}), nothing to do.",
                "OK".green().bold(),
                short(&hash)
            );
        }
        SyncOutcome::Synced { hash, files } => {
            println!(
                "{} Synced {} from {} file(s) ({}).",
                "OK".green().bold(),
                env_dir.display(),
                files.len(),
                short(&hash)
            );
            for file in &files {
                println!("   {} {}", "+".green(), file.display());
            }
        }
    }

    Ok(())
}

/// Run the clean command
///
/// Removes every generated requirements file from the environment.
pub fn run_clean(env_dir: &Path) -> Result<()> {
    ensure_env_dir(env_dir)?;
    let removed = clear_compiled_files(env_dir)?;
    println!(
        "{} Removed {} generated file(s) from {}.",
        "OK".green().bold(),
        removed,
        env_dir.display()
    );
    Ok(())
}

fn ensure_env_dir(env_dir: &Path) -> Result<()> {
    if env_dir.is_dir() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Environment directory not found: {}",
            env_dir.display()
        )))
    }
}

pub(crate) fn short(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}
