//! Filesystem layer for tox-pip-sync
//!
//! Provides path-carrying I/O errors, atomic whole-file writes, lexical
//! relative-path computation, the streaming fingerprint hasher and the
//! format-detected config store used by the core crate.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::Fingerprint;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{normalize, relative_path, to_forward_slashes};
