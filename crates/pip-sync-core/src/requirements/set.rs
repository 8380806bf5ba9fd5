//! Ordered collections of requirements and their fingerprints

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};

use pip_sync_fs::{Fingerprint, io, normalize, to_forward_slashes};
use tracing::trace;

use super::requirement::Requirement;
use crate::error::{Error, Result};

/// Files whose contents may declare the local project's dependencies
pub const PROJECT_FILE_SOURCES: [&str; 3] = ["setup.py", "setup.cfg", "pyproject.toml"];

/// An ordered list of requirements.
///
/// Order is declaration order and duplicates are kept. The fingerprint
/// computed by [`RequirementSet::hash`] is remembered for the lifetime of the
/// instance; clones start without one.
#[derive(Default)]
pub struct RequirementSet {
    requirements: Vec<Requirement>,
    memo: RefCell<Option<(PathBuf, String)>>,
}

impl RequirementSet {
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self {
            requirements,
            memo: RefCell::new(None),
        }
    }

    /// Parse each string as a requirement, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first string that does not parse.
    pub fn from_strings<I, S>(strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requirements = strings
            .into_iter()
            .map(|s| Requirement::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(requirements))
    }

    /// Read a pip requirements file.
    ///
    /// Everything after the first `#` on a line is a comment. Blank lines
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the path when the file cannot be read,
    /// and a parse error for malformed lines.
    pub fn from_requirements_file(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::from_requirements_text(&content)
    }

    /// Parse the text of a requirements file.
    pub fn from_requirements_text(content: &str) -> Result<Self> {
        let lines = content
            .lines()
            .map(|line| match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            })
            .map(str::trim)
            .filter(|line| !line.is_empty());
        Self::from_strings(lines)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Whether anything here still has to go through pip-compile.
    ///
    /// Anything which is not a reference to a file is assumed uncompiled;
    /// anything which is has been compiled by the user.
    pub fn needs_compilation(&self) -> bool {
        self.requirements.iter().any(|req| req.filename().is_none())
    }

    /// Convert every `-r` reference into a `-c` constraint.
    ///
    /// pip-compile resolves `-c` paths relative to the file declaring them,
    /// so every file name is rebased onto `relative_root`: the project root
    /// as seen from the directory the compiled file will live in. Editable
    /// targets stay relative to the working directory and are left alone.
    pub fn constrained_set(&self, relative_root: &Path) -> Self {
        let requirements = self
            .requirements
            .iter()
            .map(|req| match req {
                Requirement::Reference(path) | Requirement::Constraint(path) => {
                    Requirement::Constraint(to_forward_slashes(&relative_root.join(path)).into())
                }
                other => other.clone(),
            })
            .collect();
        Self::new(requirements)
    }

    /// Newline-joined canonical form, the content of a pip-compile input file.
    pub fn to_requirements_text(&self) -> String {
        self.requirements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Hex fingerprint of this set and everything it refers to.
    ///
    /// Folds in, per requirement and in order: its canonical string; for
    /// `-r`/`-c`, the fragments of the referenced file (recursively, relative
    /// paths resolved against `root_dir`); for local project requirements,
    /// the contents of whichever of [`PROJECT_FILE_SOURCES`] exist in
    /// `root_dir`.
    ///
    /// # Errors
    ///
    /// Fails when a referenced file cannot be read or parsed, or when
    /// references form a cycle.
    pub fn hash(&self, root_dir: &Path) -> Result<String> {
        if let Some((root, digest)) = self.memo.borrow().as_ref()
            && root == root_dir
        {
            return Ok(digest.clone());
        }

        let mut fingerprint = Fingerprint::new();
        let mut stack = Vec::new();
        self.hash_fragments(root_dir, &mut fingerprint, &mut stack)?;
        trace!(fragments = fingerprint.fragments(), "Hashed requirements");
        let digest = fingerprint.finish();

        *self.memo.borrow_mut() = Some((root_dir.to_path_buf(), digest.clone()));
        Ok(digest)
    }

    fn hash_fragments(
        &self,
        root_dir: &Path,
        fingerprint: &mut Fingerprint,
        stack: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for req in &self.requirements {
            fingerprint.update(req.to_string());

            if let Some(filename) = req.filename() {
                let path = normalize(&root_dir.join(filename));
                if stack.contains(&path) {
                    return Err(Error::ReferenceCycle { path });
                }

                let nested = Self::from_requirements_file(&path)?;
                stack.push(path);
                nested.hash_fragments(root_dir, fingerprint, stack)?;
                stack.pop();
            }

            if req.is_local() {
                hash_project_files(root_dir, fingerprint)?;
            }
        }

        Ok(())
    }
}

/// Fold in the whole contents of any project files present in `root_dir`.
///
/// Working out exactly what the project declares would mean parsing these
/// files; any change to them is treated as a possible change instead.
fn hash_project_files(root_dir: &Path, fingerprint: &mut Fingerprint) -> Result<()> {
    for file_name in PROJECT_FILE_SOURCES {
        let project_file = root_dir.join(file_name);
        if project_file.is_file() {
            fingerprint.update(io::read_bytes(&project_file)?);
        }
    }
    Ok(())
}

impl Clone for RequirementSet {
    fn clone(&self) -> Self {
        Self::new(self.requirements.clone())
    }
}

impl PartialEq for RequirementSet {
    fn eq(&self, other: &Self) -> bool {
        self.requirements == other.requirements
    }
}

impl Eq for RequirementSet {}

impl fmt::Debug for RequirementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.requirements).finish()
    }
}

impl fmt::Display for RequirementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.requirements.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", items.join(", "))
    }
}

impl From<Vec<Requirement>> for RequirementSet {
    fn from(requirements: Vec<Requirement>) -> Self {
        Self::new(requirements)
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}
