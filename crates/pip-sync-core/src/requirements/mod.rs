//! Parsing and fingerprinting of pip dependency declarations
//!
//! - **requirement**: one declaration (`package`, `-e .`, `-r file`, `-c file`)
//! - **set**: an ordered list of declarations, its pip-compile input form and
//!   its transitive content fingerprint

mod requirement;
mod set;

pub use requirement::{ArgType, Requirement};
pub use set::{PROJECT_FILE_SOURCES, RequirementSet};
