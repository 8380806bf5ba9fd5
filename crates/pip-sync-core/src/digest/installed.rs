//! Fingerprint fragments for the files installed into an environment

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use pip_sync_fs::{Error as FsError, Fingerprint};
use walkdir::WalkDir;

use crate::Result;

/// Sub directories of a virtualenv that hold installed files
pub const VENV_DIRS: [&str; 4] = ["bin", "lib", "share", "include"];

/// Fold one `<path>/<size>/<mtime>` fragment per installed file into
/// `fingerprint`.
///
/// Files are visited in path order across [`VENV_DIRS`]; byte-code (`.pyc`)
/// is skipped since the interpreter rewrites it freely. Missing directories
/// contribute nothing.
pub fn hash_installed_tree(env_dir: &Path, fingerprint: &mut Fingerprint) -> Result<()> {
    let mut files = Vec::new();

    for dir in VENV_DIRS {
        let root = env_dir.join(dir);
        if !root.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&root) {
            let entry = entry.map_err(|e| walk_error(&root, e))?;
            if entry.file_type().is_dir() {
                continue;
            }
            if entry.path().extension().is_some_and(|ext| ext == "pyc") {
                continue;
            }
            files.push(entry);
        }
    }

    files.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in files {
        let metadata = entry.metadata().map_err(|e| walk_error(entry.path(), e))?;
        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        fingerprint.update(format!(
            "{}/{}/{}",
            entry.path().display(),
            metadata.len(),
            mtime
        ));
    }

    Ok(())
}

fn walk_error(fallback: &Path, e: walkdir::Error) -> FsError {
    let path = e
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(fallback));
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
    FsError::io(path, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn digest(env_dir: &Path) -> (String, usize) {
        let mut fingerprint = Fingerprint::new();
        hash_installed_tree(env_dir, &mut fingerprint).unwrap();
        let count = fingerprint.fragments();
        (fingerprint.finish(), count)
    }

    #[test]
    fn empty_environment_contributes_nothing() {
        let temp = TempDir::new().unwrap();
        let (_, count) = digest(temp.path());
        assert_eq!(count, 0);
    }

    #[test]
    fn counts_installed_files_but_not_bytecode() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("lib/python3.12/site-packages/pkg");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("__init__.py"), "").unwrap();
        fs::write(site.join("__init__.cpython-312.pyc"), "bytes").unwrap();
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        fs::write(temp.path().join("bin/pip-sync"), "#!").unwrap();
        fs::write(temp.path().join("pyvenv.cfg"), "").unwrap();

        let (_, count) = digest(temp.path());

        assert_eq!(count, 2);
    }

    #[test]
    fn changes_when_a_file_grows() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("module.py"), "a").unwrap();
        let (before, _) = digest(temp.path());

        fs::write(lib.join("module.py"), "a longer body").unwrap();
        let (after, _) = digest(temp.path());

        assert_ne!(before, after);
    }
}
