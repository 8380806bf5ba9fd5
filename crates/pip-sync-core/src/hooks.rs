//! Lifecycle hooks for test environments
//!
//! The host orchestrator calls these at fixed points of an environment's
//! life: configuration, creation, dependency installation, the package
//! report and just before tests run.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::config::PluginConfig;
use crate::environment::{ActivityReporter, Environment};
use crate::error::Result;
use crate::sync::{SyncOptions, SyncOutcome, Synchronizer, clear_compiled_files};

/// Replaces the host's package listing when `skip_listing` is set
pub const LISTING_DISABLED_MESSAGE: &str =
    "*** listing modules disabled by tox-pip-sync in pyproject.toml ***";

/// Points in an environment's lifecycle the plugin reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Project configuration has been read
    Configure,
    /// The environment is being created or recreated
    EnvCreate,
    /// Dependencies should be installed
    InstallDeps,
    /// The host wants the list of installed packages
    EnvReport,
    /// Tests are about to run
    BeforeTests,
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configure => write!(f, "configure"),
            Self::EnvCreate => write!(f, "env-create"),
            Self::InstallDeps => write!(f, "install-deps"),
            Self::EnvReport => write!(f, "env-report"),
            Self::BeforeTests => write!(f, "before-tests"),
        }
    }
}

/// The plugin as seen by the host.
///
/// Remembers which environments were synced during this process so that
/// [`Plugin::before_tests`] only syncs environments the host skipped
/// installing into.
#[derive(Debug, Default)]
pub struct Plugin {
    config: PluginConfig,
    synced: HashSet<String>,
}

impl Plugin {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            synced: HashSet::new(),
        }
    }

    /// Load the configuration of the project in `project_dir`
    pub fn configure(project_dir: &Path) -> Result<Self> {
        debug!(event = %HookEvent::Configure, project_dir = %project_dir.display());
        Ok(Self::new(PluginConfig::load(project_dir)?))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Sync options derived from the configuration
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            hash_installed_tree: self.config.hash_venv(),
            ..SyncOptions::default()
        }
    }

    /// Whether `env` was synced by this plugin instance
    pub fn is_synced(&self, env: &dyn Environment) -> bool {
        self.synced.contains(env.name())
    }

    /// Remove generated files left over from an earlier environment; they
    /// may not compile the same way in the new one.
    pub fn on_env_create(&self, env: &dyn Environment) -> Result<()> {
        debug!(event = %HookEvent::EnvCreate, env = env.name());
        clear_compiled_files(env.env_dir())?;
        Ok(())
    }

    /// Sync the environment in place of the host's installer.
    ///
    /// Always returns `true`: the host must not install dependencies itself.
    pub fn install_deps(
        &mut self,
        env: &dyn Environment,
        reporter: &dyn ActivityReporter,
    ) -> Result<bool> {
        debug!(event = %HookEvent::InstallDeps, env = env.name());
        let outcome = Synchronizer::new(env, reporter)
            .with_options(self.sync_options())
            .sync()?;
        if let SyncOutcome::Synced { files, .. } = &outcome {
            debug!(env = env.name(), files = files.len(), "Environment synced");
        }

        self.synced.insert(env.name().to_string());
        Ok(true)
    }

    /// Replacement for the host's installed-package report, `None` to let
    /// the host produce its own.
    pub fn env_report(&self, env: &dyn Environment) -> Option<Vec<String>> {
        debug!(event = %HookEvent::EnvReport, env = env.name());
        self.config
            .skip_listing()
            .then(|| vec![LISTING_DISABLED_MESSAGE.to_string()])
    }

    /// Sync before tests when the host did not call
    /// [`Plugin::install_deps`] in this process.
    pub fn before_tests(
        &mut self,
        env: &dyn Environment,
        reporter: &dyn ActivityReporter,
    ) -> Result<()> {
        debug!(event = %HookEvent::BeforeTests, env = env.name());
        if !self.is_synced(env) {
            self.install_deps(env, reporter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_event_display() {
        assert_eq!(HookEvent::InstallDeps.to_string(), "install-deps");
        assert_eq!(HookEvent::BeforeTests.to_string(), "before-tests");
    }

    #[test]
    fn sync_options_follow_config() {
        let plugin = Plugin::new(PluginConfig::from_ini("[tox_pip_sync]\nhash_venv = yes\n"));
        let options = plugin.sync_options();
        assert!(options.hash_installed_tree);
        assert!(options.skip_on_hash_match);

        assert!(!Plugin::default().sync_options().hash_installed_tree);
    }
}
