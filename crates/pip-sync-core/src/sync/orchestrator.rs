//! Syncing an environment with pip-sync
//!
//! Works out which requirements files to hand to `pip-sync`: references to
//! files the user already compiled are passed straight through, and
//! everything else is written to one generated file and compiled with
//! `pip-compile` first.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use pip_sync_fs::{io, relative_path};
use tracing::{debug, info};

use super::runner::ToolRunner;
use crate::digest::{ChangeDetector, SyncState};
use crate::environment::{ActivityReporter, Environment};
use crate::error::{Error, Result};
use crate::requirements::{Requirement, RequirementSet};

/// Name prefix of every file generated inside an environment
pub const COMPILED_PREFIX: &str = "tox-pip-sync_";

/// Glob matching every generated file; these are ours to delete
pub const COMPILED_PATTERN: &str = "tox-pip-sync_*";

/// Options for a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Skip pip-sync when the recorded fingerprint matches
    pub skip_on_hash_match: bool,
    /// Include the installed file tree in the fingerprint
    pub hash_installed_tree: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            skip_on_hash_match: true,
            hash_installed_tree: false,
        }
    }
}

/// What a sync run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing changed since the last successful sync
    Skipped { hash: String },
    /// pip-sync ran with `files`; `hash` is now recorded
    Synced { hash: String, files: Vec<PathBuf> },
}

/// Drives pip-compile and pip-sync for one environment.
pub struct Synchronizer<'a> {
    env: &'a dyn Environment,
    runner: ToolRunner<'a>,
    options: SyncOptions,
}

impl<'a> Synchronizer<'a> {
    pub fn new(env: &'a dyn Environment, reporter: &'a dyn ActivityReporter) -> Self {
        Self {
            env,
            runner: ToolRunner::new(env, reporter),
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// The environment's declared dependencies as a fresh set
    pub fn requirements(&self) -> Result<RequirementSet> {
        RequirementSet::from_strings(self.env.deps())
    }

    /// Change detector for this environment
    pub fn detector(&self) -> ChangeDetector {
        ChangeDetector::new(self.env.env_dir())
            .with_installed_tree(self.options.hash_installed_tree)
    }

    /// Whether the environment matches its recorded fingerprint
    pub fn state(&self) -> Result<SyncState> {
        let requirements = self.requirements()?;
        let detector = self.detector();
        let current = detector.fingerprint(&requirements, self.env.project_root())?;
        Ok(detector.state(&current))
    }

    /// Bring the environment in line with its declared dependencies.
    ///
    /// Skips everything when the fingerprint is unchanged. Otherwise runs
    /// pip-sync over [`Self::requirements_files`] and records the new
    /// fingerprint once pip-sync has succeeded.
    pub fn sync(&self) -> Result<SyncOutcome> {
        let requirements = self.requirements()?;
        let root_dir = self.env.project_root();
        let detector = self.detector();
        let current = detector.fingerprint(&requirements, root_dir)?;

        if self.options.skip_on_hash_match && detector.state(&current) == SyncState::InSync {
            info!(env = self.env.name(), "Skipping pip-sync, as hash has not changed");
            return Ok(SyncOutcome::Skipped { hash: current });
        }

        let files = self.requirements_files(&requirements)?;
        let args: Vec<OsString> = files.iter().map(|f| f.as_os_str().to_owned()).collect();
        self.runner.run("pip-sync", &args, "Syncing virtual env with pip-sync")?;

        // pip-sync has just changed the installed tree
        let recorded = if detector.hashes_installed_tree() {
            detector.fingerprint(&requirements, root_dir)?
        } else {
            current
        };
        detector.save(&recorded)?;

        Ok(SyncOutcome::Synced {
            hash: recorded,
            files,
        })
    }

    /// The requirements files to pass to pip-sync, in order.
    ///
    /// Every `-r` file as declared, then (when anything needs compiling) the
    /// compiled file generated for this set. `-c` files only take part in
    /// compilation.
    pub fn requirements_files(&self, requirements: &RequirementSet) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = requirements
            .iter()
            .filter_map(|req| match req {
                Requirement::Reference(path) => Some(path.clone()),
                _ => None,
            })
            .collect();

        if requirements.needs_compilation() {
            files.push(self.pinned_file(requirements)?);
        }

        Ok(files)
    }

    /// The compiled file for `requirements`, compiling it when no file for
    /// this fingerprint exists yet.
    ///
    /// # Errors
    ///
    /// [`Error::CompileFailed`] when pip-compile does not produce
    /// `tox-pip-sync_<hash>.txt`.
    pub fn pinned_file(&self, requirements: &RequirementSet) -> Result<PathBuf> {
        let root_dir = self.env.project_root();
        let env_dir = self.env.env_dir();
        let stub = format!("{COMPILED_PREFIX}{}", requirements.hash(root_dir)?);

        let pinned = env_dir.join(format!("{stub}.txt"));
        if pinned.exists() {
            info!(path = %pinned.display(), "Using existing compiled dependencies");
            return Ok(pinned);
        }

        clear_compiled_files(env_dir)?;

        let relative_root = relative_path(env_dir, root_dir)?;
        let constrained = requirements.constrained_set(&relative_root);
        let unpinned = env_dir.join(format!("{stub}.in"));
        io::write_text(&unpinned, &constrained.to_requirements_text())?;
        debug!(path = %unpinned.display(), "Wrote uncompiled requirements");

        self.runner.run(
            "pip-compile",
            &[unpinned.into_os_string()],
            &format!("Compiling dependencies '{constrained}'"),
        )?;

        if !pinned.exists() {
            return Err(Error::CompileFailed { expected: pinned });
        }
        Ok(pinned)
    }
}

/// Remove every file tox-pip-sync generated in `env_dir`.
///
/// Returns how many files were removed.
pub fn clear_compiled_files(env_dir: &Path) -> Result<usize> {
    let removed = io::remove_matching(env_dir, COMPILED_PATTERN)?;
    if removed > 0 {
        debug!(env_dir = %env_dir.display(), removed, "Cleared compiled files");
    }
    Ok(removed)
}
