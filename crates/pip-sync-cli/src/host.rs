//! An [`Environment`] backed by a virtualenv on the local disk

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use pip_sync_core::{Environment, Error as CoreError, Result as CoreResult};
use tracing::debug;

use crate::cli::Target;
use crate::error::Result;

/// A virtualenv directory plus the project it belongs to.
///
/// Processes run for real with [`std::process::Command`]; packages are
/// installed with the environment's own `python -m pip`.
#[derive(Debug, Clone)]
pub struct LocalEnvironment {
    name: String,
    env_dir: PathBuf,
    project_root: PathBuf,
    deps: Vec<String>,
}

impl LocalEnvironment {
    /// Describe the environment at `env_dir` for `target`.
    ///
    /// Both directories are made absolute against the current directory.
    pub fn new(env_dir: &Path, target: &Target) -> Result<Self> {
        let env_dir = std::path::absolute(env_dir)?;
        let project_root = std::path::absolute(&target.project_root)?;
        let name = env_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "env".to_string());

        Ok(Self {
            name,
            env_dir,
            project_root,
            deps: target.deps.clone(),
        })
    }

    fn python(&self) -> PathBuf {
        self.bin_dir()
            .join(format!("python{}", std::env::consts::EXE_SUFFIX))
    }
}

impl Environment for LocalEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn env_dir(&self) -> &Path {
        &self.env_dir
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn deps(&self) -> &[String] {
        &self.deps
    }

    fn run(&self, program: &Path, args: &[OsString], cwd: &Path) -> CoreResult<String> {
        let command_line = describe(program, args);
        debug!(command = %command_line, cwd = %cwd.display(), "Running");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .env("VIRTUAL_ENV", &self.env_dir)
            .output()
            .map_err(|e| CoreError::Fs(pip_sync_fs::Error::io(program, e)))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(CoreError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                output: combined,
            })
        }
    }

    fn install(&self, packages: &[&str]) -> CoreResult<()> {
        let mut args: Vec<OsString> = ["-m", "pip", "install"].map(OsString::from).to_vec();
        args.extend(packages.iter().map(OsString::from));
        self.run(&self.python(), &args, self.work_dir())?;
        Ok(())
    }
}

fn describe(program: &Path, args: &[OsString]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}
