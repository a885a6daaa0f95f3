//! Project directory layout
//!
//! Generated code lands under the project root (`backend/`, `web_app/`);
//! run artifacts such as the session log live in the `AI/` workspace.

use std::path::Path;

use crate::{NormalizedPath, Result, io};

/// Well-known paths inside a project, relative to its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `AI` workspace directory (logs, run artifacts)
    AiDir,
    /// Generated backend source
    BackendMain,
    /// Generated web frontend entry point
    WebAppIndex,
    /// Output of the test agent
    TestResults,
    /// Project configuration file
    ConfigFile,
    /// Dotenv file holding secrets
    EnvFile,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiDir => "AI",
            Self::BackendMain => "backend/main.py",
            Self::WebAppIndex => "web_app/index.js",
            Self::TestResults => "backend/test_results.log",
            Self::ConfigFile => "forge.toml",
            Self::EnvFile => ".env",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A project root plus the name of its AI workspace directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: NormalizedPath,
    ai_dir: String,
}

impl ProjectLayout {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            ai_dir: ProjectPath::AiDir.as_str().to_string(),
        }
    }

    /// Use a different name for the AI workspace directory.
    pub fn with_ai_dir(mut self, ai_dir: impl Into<String>) -> Self {
        self.ai_dir = ai_dir.into();
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn ai_dir(&self) -> NormalizedPath {
        self.root.join(&self.ai_dir)
    }

    /// Resolve a well-known path against the root.
    pub fn path(&self, which: ProjectPath) -> NormalizedPath {
        match which {
            ProjectPath::AiDir => self.ai_dir(),
            other => self.root.join(other.as_str()),
        }
    }

    /// Create the AI workspace directory.
    pub fn prepare(&self) -> Result<()> {
        let ai_dir = self.ai_dir();
        io::ensure_dir(&ai_dir)?;
        tracing::debug!(path = %ai_dir, "AI workspace ready");
        Ok(())
    }
}
