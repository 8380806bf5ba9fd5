//! Reading `[tool.tox.tox_pip_sync]` from `pyproject.toml`

use std::collections::BTreeMap;
use std::path::Path;

use pip_sync_fs::ConfigStore;

use super::SECTION;
use crate::Result;

/// Options from the `[tool.tox.tox_pip_sync]` table of `path`.
///
/// A missing file, or a file without the table, yields no options.
///
/// # Errors
///
/// Malformed TOML is reported as a config parse error naming the file.
pub fn load_section(path: &Path) -> Result<BTreeMap<String, toml::Value>> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }

    let document: toml::Value = ConfigStore::new().load(path)?;
    Ok(section_of(&document))
}

/// Our table within a parsed pyproject.toml document
pub fn section_of(document: &toml::Value) -> BTreeMap<String, toml::Value> {
    document
        .get("tool")
        .and_then(|tool| tool.get("tox"))
        .and_then(|tox| tox.get(SECTION))
        .and_then(toml::Value::as_table)
        .map(|table| {
            table
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}
