//! Shared test utilities for the tox-pip-sync workspace.
//!
//! This crate provides standardised test fixtures for the crate test
//! suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`env`]: [`FakeEnvironment`] recording every process it is asked to run
//! - [`project`]: [`TestProject`] builder for a project with an environment
//!   directory inside it

pub mod env;
pub mod project;

pub use env::{Call, CompileBehaviour, FakeEnvironment, RecordingReporter};
pub use project::TestProject;
