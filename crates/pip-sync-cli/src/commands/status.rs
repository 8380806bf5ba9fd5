//! Status and hash command implementations

use std::path::Path;

use colored::Colorize;

use pip_sync_core::{Plugin, RequirementSet, SyncState, Synchronizer, TracingReporter};

use super::sync::short;
use crate::cli::Target;
use crate::error::Result;
use crate::host::LocalEnvironment;

/// Run the hash command
///
/// Prints the full fingerprint of the declared dependencies on its own line.
pub fn run_hash(target: &Target) -> Result<()> {
    let requirements = RequirementSet::from_strings(&target.deps)?;
    let hash = requirements.hash(&target.project_root)?;
    println!("{hash}");
    Ok(())
}

/// Run the status command
///
/// Compares the current fingerprint with the environment's record. Always
/// succeeds; the answer is in the output.
pub fn run_status(env_dir: &Path, target: &Target) -> Result<()> {
    let env = LocalEnvironment::new(env_dir, target)?;
    let plugin = Plugin::configure(&target.project_root)?;
    let reporter = TracingReporter;
    let sync = Synchronizer::new(&env, &reporter).with_options(plugin.sync_options());

    let recorded = sync.detector().record().last_hash();

    match sync.state()? {
        SyncState::InSync => {
            println!("{} {} is in sync.", "OK".green().bold(), env_dir.display());
        }
        SyncState::OutOfSync => {
            println!(
                "{} {} is out of sync.",
                "DRIFT".yellow().bold(),
                env_dir.display()
            );
            match recorded {
                Some(hash) => println!("   recorded: {}", short(&hash)),
                None => println!("   recorded: {}", "none".dimmed()),
            }
        }
    }

    Ok(())
}
