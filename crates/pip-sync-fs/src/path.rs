//! Lexical path helpers
//!
//! Nothing here touches the filesystem beyond resolving the current
//! directory for relative inputs; symlinks are never followed.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Lexically normalize a path.
///
/// Removes `.` components and folds `..` into the preceding component where
/// one exists. Leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Compute the path of `target` relative to the directory `base`.
///
/// Both inputs are made absolute against the current directory and
/// normalized first. The result walks up out of `base` with `..` as needed,
/// so `relative_path("/p/.tox/py", "/p")` is `../..`. Identical inputs give
/// `.`. When the two paths share no root (different drives) `target` is
/// returned in absolute form.
pub fn relative_path(base: &Path, target: &Path) -> Result<PathBuf> {
    let base = normalize(&std::path::absolute(base).map_err(|e| Error::io(base, e))?);
    let target = normalize(&std::path::absolute(target).map_err(|e| Error::io(target, e))?);

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    if base_parts.first() != target_parts.first() {
        return Ok(target);
    }

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

/// Render a path with forward slashes, the form pip accepts on every
/// platform inside requirements files.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
