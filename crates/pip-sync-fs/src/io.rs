//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy so readers never observe a
/// partially written file. Acquires an advisory lock on the temp file while
/// writing.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_path_for(path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Sibling temp file for an atomic write of `path`.
///
/// Same directory, so the rename stays on one filesystem. The name starts
/// with the target's own name, so a glob that owns the target also owns a
/// temp file left behind by a crash.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.{}.tmp", std::process::id()))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Remove every file directly inside `dir` whose name matches `pattern`.
///
/// `pattern` is a shell-style glob applied to file names only (for example
/// `tox-pip-sync_*`). Directories that match are left alone. A missing `dir`
/// removes nothing.
///
/// Returns the number of files removed.
pub fn remove_matching(dir: &Path, pattern: &str) -> Result<usize> {
    // Brackets or stars in the directory itself must match literally
    let escaped = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );

    let entries = glob::glob(&escaped).map_err(|e| Error::Pattern {
        pattern: escaped.clone(),
        message: e.to_string(),
    })?;

    let mut removed = 0;
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io(path, e.into_error())
        })?;

        if !path.is_file() {
            continue;
        }

        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        debug!(path = %path.display(), "Removed file");
        removed += 1;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("record.json");

        write_atomic(&path, b"{}").unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["record.json".to_string()]);
    }

    #[test]
    fn temp_file_keeps_the_target_name_as_prefix() {
        let temp = temp_path_for(Path::new("/env/tox-pip-sync_abc.in"));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(temp.parent(), Some(Path::new("/env")));
        assert!(name.starts_with("tox-pip-sync_abc.in."));
        assert!(name.ends_with(".tmp"));
        assert!(glob::Pattern::new("tox-pip-sync_*").unwrap().matches(&name));
    }

    #[test]
    fn remove_matching_on_missing_dir_is_noop() {
        let temp = TempDir::new().unwrap();
        let removed = remove_matching(&temp.path().join("nope"), "x_*").unwrap();
        assert_eq!(removed, 0);
    }
}
