//! [`TestProject`] builder for pipeline and CLI scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::git;

/// A temporary project root with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use forge_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.init_git_with_remote();
/// project.write_config("[embedding]\nbackend = \"hash\"\n");
/// project.assert_file_exists("forge.toml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    remote_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            remote_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Location of the bare remote created by [`Self::init_git_with_remote`].
    pub fn remote(&self) -> &Path {
        self.remote_dir.path()
    }

    /// Make the root a git repository with one commit on `main` and an
    /// `origin` pointing at a local bare repository.
    pub fn init_git_with_remote(&self) {
        git::real_git_repo_with_commit(self.root());
        git::bare_remote(self.remote());
        git::add_origin(self.root(), self.remote());
    }

    /// Write `forge.toml` at the project root.
    pub fn write_config(&self, content: &str) {
        fs::write(self.root().join("forge.toml"), content).unwrap();
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

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

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
