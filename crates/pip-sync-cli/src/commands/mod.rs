//! Command implementations for pip-sync-cli

pub mod status;
pub mod sync;

pub use status::{run_hash, run_status};
pub use sync::{run_clean, run_sync};
