//! Plugin configuration
//!
//! Options are read from two layers, later layers overriding earlier ones:
//!
//! 1. **tox.ini** - the `[tox_pip_sync]` section
//! 2. **pyproject.toml** - the `[tool.tox.tox_pip_sync]` table
//!
//! INI values are strings; the typed options listed in [`TYPED_OPTIONS`] are
//! coerced to booleans when the file is read. TOML values keep their types.

mod ini;
mod pyproject;

use std::collections::BTreeMap;
use std::path::Path;

use pip_sync_fs::{ConfigStore, io};
use tracing::debug;

use crate::Result;

pub use ini::parse_bool;

/// Section (INI) and table (TOML) name holding our options
pub const SECTION: &str = "tox_pip_sync";

/// Boolean options and their defaults
pub const TYPED_OPTIONS: [(&str, bool); 2] = [("skip_listing", true), ("hash_venv", false)];

/// Options controlling the plugin for one project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginConfig {
    values: BTreeMap<String, toml::Value>,
}

impl PluginConfig {
    /// Load and merge the configuration of the project in `project_dir`.
    ///
    /// Missing files, or files without our section, contribute nothing.
    ///
    /// # Errors
    ///
    /// Fails when a present file cannot be read, or when `pyproject.toml`
    /// is not valid TOML.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let ini_path = project_dir.join("tox.ini");
        if ini_path.is_file() {
            debug!(path = %ini_path.display(), "Loading tox.ini config (layer 1)");
            let content = io::read_text(&ini_path)?;
            config.merge(Self::from_ini(&content));
        } else {
            debug!(path = %ini_path.display(), "No tox.ini found (layer 1), skipping");
        }

        let toml_path = project_dir.join("pyproject.toml");
        debug!(path = %toml_path.display(), "Loading pyproject.toml config (layer 2)");
        config.merge(Self {
            values: pyproject::load_section(&toml_path)?,
        });

        Ok(config)
    }

    /// Options from the `[tox_pip_sync]` section of tox.ini `content`
    pub fn from_ini(content: &str) -> Self {
        let values = ini::parse_section(content, SECTION)
            .into_iter()
            .map(|(key, raw)| {
                let value = match TYPED_OPTIONS.iter().find(|(name, _)| *name == key) {
                    Some((_, default)) => toml::Value::Boolean(parse_bool(&raw).unwrap_or(*default)),
                    None => toml::Value::String(raw),
                };
                (key, value)
            })
            .collect();
        Self { values }
    }

    /// Options from the text of a pyproject.toml file
    pub fn from_pyproject(content: &str) -> Result<Self> {
        let document: toml::Value = ConfigStore::parse(Path::new("pyproject.toml"), content)?;
        let values = pyproject::section_of(&document);
        Ok(Self { values })
    }

    /// Overlay `other` on top of this config; its keys win.
    pub fn merge(&mut self, other: Self) {
        self.values.extend(other.values);
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    /// Boolean option `key`, `default` when unset or not a boolean
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(toml::Value::Boolean(value)) => *value,
            Some(toml::Value::String(raw)) => parse_bool(raw).unwrap_or(default),
            _ => default,
        }
    }

    /// Whether to suppress the host's installed-package listing
    pub fn skip_listing(&self) -> bool {
        self.get_bool("skip_listing", option_default("skip_listing"))
    }

    /// Whether the installed file tree takes part in change detection
    pub fn hash_venv(&self) -> bool {
        self.get_bool("hash_venv", option_default("hash_venv"))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn option_default(name: &str) -> bool {
    TYPED_OPTIONS
        .iter()
        .find(|(option, _)| *option == name)
        .is_some_and(|(_, default)| *default)
}
