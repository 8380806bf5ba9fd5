//! Core of tox-pip-sync
//!
//! Keeps a test environment's installed packages exactly in line with its
//! declared dependencies using pip-tools:
//!
//! - **Requirements**: parsing dependency declarations and fingerprinting
//!   everything they refer to
//! - **Change detection**: comparing fingerprints with the one recorded after
//!   the last successful sync
//! - **Sync**: compiling unpinned requirements with `pip-compile` and
//!   applying the result with `pip-sync`
//! - **Hooks**: the lifecycle entry points a host orchestrator calls
//!
//! # Architecture
//!
//! ```text
//!              host (tox plugin shim / CLI)
//!                        |
//!                     hooks
//!                        |
//!       config -------- sync -------- digest
//!                        |              |
//!                   requirements -------+
//!                        |
//!                   pip-sync-fs
//! ```
//!
//! Everything the core needs from the host comes through the
//! [`Environment`] and [`ActivityReporter`] traits.

pub mod config;
pub mod digest;
pub mod environment;
pub mod error;
pub mod hooks;
pub mod requirements;
pub mod sync;

pub use config::PluginConfig;
pub use digest::{ChangeDetector, EnvData, SyncState};
pub use environment::{ActivityReporter, Environment, TracingReporter};
pub use error::{Error, Result};
pub use hooks::{HookEvent, LISTING_DISABLED_MESSAGE, Plugin};
pub use requirements::{ArgType, Requirement, RequirementSet};
pub use sync::{
    SyncOptions, SyncOutcome, Synchronizer, ToolRunner, clear_compiled_files,
};
