//! Capabilities the host provides for one test environment

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Result;

/// A virtual environment managed by the host orchestrator.
///
/// The core never reaches into host internals; everything it needs about an
/// environment comes through this trait.
pub trait Environment {
    /// Name of the environment, e.g. `py312`
    fn name(&self) -> &str;

    /// The environment's private directory (its virtualenv root)
    fn env_dir(&self) -> &Path;

    /// Directory holding the environment's executables
    fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.env_dir().join("Scripts")
        } else {
            self.env_dir().join("bin")
        }
    }

    /// Project root that relative requirement files and project files
    /// (`setup.py`, `pyproject.toml`, ...) are resolved against
    fn project_root(&self) -> &Path;

    /// Working directory external tools run in
    fn work_dir(&self) -> &Path {
        self.project_root()
    }

    /// The environment's declared dependencies, in declaration order
    fn deps(&self) -> &[String];

    /// Run `program` with `args` from `cwd`, returning combined output.
    ///
    /// # Errors
    ///
    /// Implementations return [`crate::Error::CommandFailed`] when the
    /// process exits abnormally.
    fn run(&self, program: &Path, args: &[OsString], cwd: &Path) -> Result<String>;

    /// Install packages into this environment with the host's installer
    fn install(&self, packages: &[&str]) -> Result<()>;
}

/// Sink for "what is happening now" status messages.
pub trait ActivityReporter {
    fn set_activity(&self, name: &str, message: &str);
}

/// Reporter that writes activity to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ActivityReporter for TracingReporter {
    fn set_activity(&self, name: &str, message: &str) {
        info!(activity = name, "{}", message);
    }
}
