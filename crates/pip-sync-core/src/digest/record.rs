//! The digest record persisted inside an environment

use std::path::{Path, PathBuf};

use pip_sync_fs::ConfigStore;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;

/// File name of the record inside the environment directory
pub const DIGEST_FILE: &str = "tox-pip-sync.json";

#[derive(Debug, Serialize)]
struct DigestRecord<'a> {
    hash: &'a str,
}

/// Data stored in an environment by and for tox-pip-sync.
#[derive(Debug, Clone)]
pub struct EnvData {
    path: PathBuf,
}

impl EnvData {
    /// Address the record of the environment rooted at `env_dir`
    pub fn new(env_dir: &Path) -> Self {
        Self {
            path: env_dir.join(DIGEST_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The fingerprint recorded by the last successful sync.
    ///
    /// A missing, unreadable or malformed record reads as `None`: when in
    /// doubt the environment gets synced.
    pub fn last_hash(&self) -> Option<String> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No digest record");
            return None;
        }

        let value = match ConfigStore::new().load::<Value>(&self.path) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable digest record");
                return None;
            }
        };

        // Only a `{"hash": "<hex>"}` object counts as a record
        let hash = value
            .as_object()
            .and_then(|record| record.get("hash"))
            .and_then(Value::as_str);
        if hash.is_none() {
            warn!(path = %self.path.display(), "Ignoring malformed digest record");
        }
        hash.map(str::to_string)
    }

    /// Replace the record with `hash`.
    pub fn save(&self, hash: &str) -> Result<()> {
        let record = DigestRecord { hash };
        ConfigStore::new().save(&self.path, &record)?;
        Ok(())
    }
}
