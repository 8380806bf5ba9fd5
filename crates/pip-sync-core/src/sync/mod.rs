//! Syncing environments with pip-tools
//!
//! - **orchestrator**: decide skip-vs-sync, pick the files for pip-sync and
//!   generate/compile the lockfile for uncompiled requirements
//! - **runner**: run pip-tools executables inside an environment,
//!   bootstrapping pip-tools when it is missing

mod orchestrator;
mod runner;

pub use orchestrator::{
    COMPILED_PATTERN, COMPILED_PREFIX, SyncOptions, SyncOutcome, Synchronizer,
    clear_compiled_files,
};
pub use runner::{PIP_TOOLS_PACKAGE, ToolRunner};
