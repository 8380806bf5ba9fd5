//! Change detection between sync runs
//!
//! An environment is in sync when the fingerprint of its declared
//! requirements (and, optionally, of its installed files) equals the one
//! recorded after the last successful sync.

mod installed;
mod record;

use std::path::{Path, PathBuf};

use pip_sync_fs::Fingerprint;

use crate::Result;
use crate::requirements::RequirementSet;

pub use installed::{VENV_DIRS, hash_installed_tree};
pub use record::{DIGEST_FILE, EnvData};

/// Whether an environment needs syncing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// The recorded fingerprint matches the current one
    InSync,
    /// No usable record, or the fingerprints differ
    OutOfSync,
}

/// Computes fingerprints for one environment and compares them with the
/// persisted record.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    env_dir: PathBuf,
    record: EnvData,
    hash_installed: bool,
}

impl ChangeDetector {
    pub fn new(env_dir: &Path) -> Self {
        Self {
            env_dir: env_dir.to_path_buf(),
            record: EnvData::new(env_dir),
            hash_installed: false,
        }
    }

    /// Also fold the installed file tree into the fingerprint
    pub fn with_installed_tree(mut self, enabled: bool) -> Self {
        self.hash_installed = enabled;
        self
    }

    pub fn hashes_installed_tree(&self) -> bool {
        self.hash_installed
    }

    pub fn record(&self) -> &EnvData {
        &self.record
    }

    /// The current fingerprint for `requirements` resolved against
    /// `root_dir`.
    ///
    /// Without installed-tree hashing this is exactly
    /// [`RequirementSet::hash`].
    pub fn fingerprint(&self, requirements: &RequirementSet, root_dir: &Path) -> Result<String> {
        let requirements_hash = requirements.hash(root_dir)?;
        if !self.hash_installed {
            return Ok(requirements_hash);
        }

        let mut fingerprint = Fingerprint::new();
        fingerprint.update(&requirements_hash);
        hash_installed_tree(&self.env_dir, &mut fingerprint)?;
        Ok(fingerprint.finish())
    }

    /// Compare `current` with the recorded fingerprint
    pub fn state(&self, current: &str) -> SyncState {
        match self.record.last_hash() {
            Some(last) if last == current => SyncState::InSync,
            _ => SyncState::OutOfSync,
        }
    }

    pub fn is_in_sync(&self, current: &str) -> bool {
        self.state(current) == SyncState::InSync
    }

    /// Persist `current` as the fingerprint of the last successful sync
    pub fn save(&self, current: &str) -> Result<()> {
        self.record.save(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn out_of_sync_without_record() {
        let temp = TempDir::new().unwrap();
        let detector = ChangeDetector::new(temp.path());
        assert_eq!(detector.state("abc123"), SyncState::OutOfSync);
    }

    #[test]
    fn in_sync_when_record_matches() {
        let temp = TempDir::new().unwrap();
        let detector = ChangeDetector::new(temp.path());
        detector.save("abc123").unwrap();

        assert_eq!(detector.state("abc123"), SyncState::InSync);
        assert!(detector.is_in_sync("abc123"));
        assert_eq!(detector.state("def456"), SyncState::OutOfSync);
    }

    #[test]
    fn fingerprint_defaults_to_requirements_hash() {
        let temp = TempDir::new().unwrap();
        let reqs = RequirementSet::from_strings(["package"]).unwrap();
        let detector = ChangeDetector::new(temp.path());

        let fingerprint = detector.fingerprint(&reqs, temp.path()).unwrap();

        assert_eq!(fingerprint, reqs.hash(temp.path()).unwrap());
    }

    #[test]
    fn installed_tree_changes_fingerprint() {
        let temp = TempDir::new().unwrap();
        let env_dir = temp.path().join("env");
        fs::create_dir_all(env_dir.join("lib")).unwrap();
        let reqs = RequirementSet::from_strings(["package"]).unwrap();
        let detector = ChangeDetector::new(&env_dir).with_installed_tree(true);

        let before = detector.fingerprint(&reqs, temp.path()).unwrap();
        fs::write(env_dir.join("lib/new_module.py"), "x = 1").unwrap();
        let after = detector.fingerprint(&reqs, temp.path()).unwrap();

        assert_ne!(before, after);
        assert_ne!(before, reqs.hash(temp.path()).unwrap());
    }
}
