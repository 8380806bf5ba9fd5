//! Running pip-tools executables inside an environment

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::environment::{ActivityReporter, Environment};
use crate::error::{Error, Result};

/// Package that provides `pip-compile` and `pip-sync`
pub const PIP_TOOLS_PACKAGE: &str = "pip-tools";

/// Runs executables from an environment's bin directory, installing
/// pip-tools into the environment first when they are missing.
pub struct ToolRunner<'a> {
    env: &'a dyn Environment,
    reporter: &'a dyn ActivityReporter,
}

impl<'a> ToolRunner<'a> {
    pub fn new(env: &'a dyn Environment, reporter: &'a dyn ActivityReporter) -> Self {
        Self { env, reporter }
    }

    /// Where `exe_name` lives inside the environment
    pub fn executable(&self, exe_name: &str) -> PathBuf {
        self.env
            .bin_dir()
            .join(format!("{exe_name}{}", std::env::consts::EXE_SUFFIX))
    }

    /// Make sure `exe_name` exists in the environment, bootstrapping
    /// pip-tools if it does not.
    ///
    /// `--force` keeps the install inside the environment even when the host
    /// would otherwise pick up a copy from the system site-packages.
    ///
    /// # Errors
    ///
    /// [`Error::BootstrapFailed`] when the install succeeds but the
    /// executable is still missing. Install failures propagate unchanged.
    pub fn ensure_installed(&self, exe_name: &str) -> Result<PathBuf> {
        let exe_path = self.executable(exe_name);
        if exe_path.exists() {
            return Ok(exe_path);
        }

        info!(env = self.env.name(), "Bootstrapping pip-tools");
        self.env.install(&[PIP_TOOLS_PACKAGE, "--force"])?;

        if !exe_path.exists() {
            return Err(Error::BootstrapFailed {
                executable: exe_path,
                package: PIP_TOOLS_PACKAGE.to_string(),
            });
        }
        Ok(exe_path)
    }

    /// Run `exe_name` with `args` from the environment's working directory.
    ///
    /// The activity is reported before the process starts; its combined
    /// output is logged and returned. Failures are not retried.
    pub fn run(&self, exe_name: &str, args: &[OsString], message: &str) -> Result<String> {
        let exe_path = self.ensure_installed(exe_name)?;

        self.reporter.set_activity(exe_name, message);
        let output = self.env.run(&exe_path, args, self.env.work_dir())?;
        debug!(exe = exe_name, "{}", output);

        Ok(output)
    }
}
