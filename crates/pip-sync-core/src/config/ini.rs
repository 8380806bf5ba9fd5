//! Reading the `[tox_pip_sync]` section of `tox.ini`
//!
//! Only what tox.ini files actually use is supported: `[section]` headers,
//! `key = value` / `key: value` pairs, indented continuation lines and
//! whole-line `#`/`;` comments. Keys are case-insensitive.

use std::collections::BTreeMap;

/// Values ConfigParser accepts for booleans
const BOOLEAN_STATES: [(&str, bool); 8] = [
    ("1", true),
    ("yes", true),
    ("true", true),
    ("on", true),
    ("0", false),
    ("no", false),
    ("false", false),
    ("off", false),
];

/// Interpret an INI value as a boolean, `None` when it is not one
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim().to_lowercase();
    BOOLEAN_STATES
        .iter()
        .find(|(state, _)| *state == value)
        .map(|(_, b)| *b)
}

/// Collect the raw key/value pairs of `section` from INI `content`.
///
/// A section that appears more than once is merged, later keys winning.
pub fn parse_section(content: &str, section: &str) -> BTreeMap<String, String> {
    let mut values: BTreeMap<String, String> = BTreeMap::new();
    let mut in_section = false;
    let mut last_key: Option<String> = None;

    for raw in content.lines() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_section = line[1..line.len() - 1].trim() == section;
            last_key = None;
            continue;
        }

        if !in_section {
            continue;
        }

        if raw.starts_with(char::is_whitespace)
            && let Some(key) = &last_key
        {
            if let Some(value) = values.get_mut(key) {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(line);
            }
            continue;
        }

        let Some(idx) = line.find(['=', ':']) else {
            continue;
        };
        let key = line[..idx].trim().to_lowercase();
        let value = line[idx + 1..].trim().to_string();
        values.insert(key.clone(), value);
        last_key = Some(key);
    }

    values
}
