//! [`TestProject`] builder for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with an environment directory at
/// `.tox/<env>` inside it, the way tox lays them out.
///
/// # Example
///
/// ```rust,no_run
/// use pip_sync_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write("requirements.txt", "requests==2.31.0\n");
/// project.assert_file_exists("requirements.txt");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    env_name: String,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project with an empty `py` environment directory.
    pub fn new() -> Self {
        Self::with_env("py")
    }

    /// Create an empty project whose environment is called `env_name`.
    pub fn with_env(env_name: &str) -> Self {
        let project = Self {
            temp_dir: TempDir::new().unwrap(),
            env_name: env_name.to_string(),
        };
        fs::create_dir_all(project.env_dir()).unwrap();
        project
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    /// Return the environment directory, `<root>/.tox/<env>`.
    pub fn env_dir(&self) -> PathBuf {
        self.root().join(".tox").join(&self.env_name)
    }

    /// Write `content` to `path` relative to the project root, creating
    /// parent directories.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Write `content` to `name` inside the environment directory.
    pub fn write_env_file(&self, name: &str, content: &str) -> PathBuf {
        let full_path = self.env_dir().join(name);
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Names of the files directly inside the environment directory, sorted.
    pub fn env_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.env_dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the project root)
    /// contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
