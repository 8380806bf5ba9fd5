//! Error types for pip-sync-core

use std::path::PathBuf;

/// Result type for pip-sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving and syncing requirements
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dependency declaration started with an unknown `-x` prefix
    #[error("Unrecognised requirement argument in '{line}': expected one of -c, -e, -r")]
    Parse { line: String },

    /// A requirements file refers back to itself through `-r`/`-c`
    #[error("Requirements file {path} references itself")]
    ReferenceCycle { path: PathBuf },

    /// Installing pip-tools did not provide the expected executable
    #[error("Expected executable '{executable}' was not installed as a result of installing `{package}`")]
    BootstrapFailed { executable: PathBuf, package: String },

    /// pip-compile ran but did not write the compiled file
    #[error("Compiled requirements file not found: {expected}")]
    CompileFailed { expected: PathBuf },

    /// An external command exited abnormally
    #[error("Command failed ({}): {command}\n{output}", describe_exit(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// Filesystem error from pip-sync-fs
    #[error(transparent)]
    Fs(#[from] pip_sync_fs::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Create a parse error for the given raw declaration
    pub fn parse(line: impl Into<String>) -> Self {
        Self::Parse { line: line.into() }
    }
}
