//! Settings resolution
//!
//! Settings come from three places, in increasing precedence for
//! non-secret keys:
//!
//! 1. `forge.toml` (or `.json`/`.yaml`) at the project root
//! 2. the project's `.env` file
//! 3. the process environment
//!
//! Secrets are read from either the environment (with `.env` support) or the
//! config file, depending on `credentials.source`. They are never printed.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use forge_agent::{Crew, OpenAiRunner, Role, RoleOverride, RunnerConfig};
use forge_fs::{ConfigStore, NormalizedPath, ProjectLayout, ProjectPath};
use forge_git::{GitCli, GitHubClient, GitHubConfig, GitHubPublisher};
use forge_vector::{
    DEFAULT_DIMENSION, DEFAULT_EMBEDDING_MODEL, Embedder, HashEmbedder, OpenAiEmbedder,
    OpenAiEmbedderConfig,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const GITHUB_API_KEY_VAR: &str = "GITHUB_API_KEY";
pub const GITHUB_REPO_VAR: &str = "FORGE_GITHUB_REPO";
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

fn default_ai_dir() -> String {
    ProjectPath::AiDir.as_str().to_string()
}

fn default_max_turns() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

/// Where secrets are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// `OPENAI_API_KEY` / `GITHUB_API_KEY` from the environment or `.env`
    #[default]
    #[serde(alias = "env")]
    Environment,
    /// `[credentials]` values in the config file
    Inline,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Inline => "inline",
        }
    }
}

/// Embedding backend for the vector index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    OpenAi,
    /// Local feature hashing, no network
    Hash,
}

impl EmbeddingBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Hash => "hash",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_ai_dir")]
    pub ai_dir: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            ai_dir: default_ai_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsSection {
    #[serde(default)]
    pub source: CredentialSource,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub github_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiSection {
    fn default() -> Self {
        Self {
            base_url: None,
            max_turns: default_max_turns(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSection {
    /// `owner/name`
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            repo: None,
            api_url: None,
            base_branch: default_base_branch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSection {
    #[serde(default)]
    pub backend: EmbeddingBackend,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

impl Default for EmbeddingSection {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model: default_embedding_model(),
            dimension: default_dimension(),
        }
    }
}

/// Contents of `forge.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub credentials: CredentialsSection,
    #[serde(default)]
    pub openai: OpenAiSection,
    #[serde(default)]
    pub github: GitHubSection,
    #[serde(default)]
    pub embedding: EmbeddingSection,
    /// Per-role overrides keyed by role name (`project_manager`, `backend`, ...)
    #[serde(default)]
    pub agents: BTreeMap<String, RoleOverride>,
}

/// A secret value that masks itself in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `****` followed by the last four characters, or only `****` for
    /// short values.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret({})", self.masked())
    }
}

/// Resolved embedding configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    pub model: String,
    pub dimension: usize,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ai_dir: String,
    pub credential_source: CredentialSource,
    pub openai_api_key: Option<Secret>,
    pub github_token: Option<Secret>,
    pub openai_base_url: String,
    pub github_api_url: String,
    pub github_repo: Option<String>,
    pub base_branch: String,
    pub max_turns: usize,
    pub timeout: Duration,
    pub embedding: EmbeddingSettings,
    pub overrides: HashMap<Role, RoleOverride>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing file yields no pairs.
fn read_dotenv(path: &NormalizedPath) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let mut pairs = HashMap::new();
    for item in dotenvy::from_path_iter(path.to_native())? {
        let (key, value) = item?;
        pairs.insert(key, value);
    }
    tracing::debug!(path = %path, count = pairs.len(), "Loaded .env");
    Ok(pairs)
}

impl Settings {
    /// Load settings for the project at `root`.
    ///
    /// `config` overrides the default `forge.toml` location; an explicit
    /// config file must exist.
    pub fn load(root: &Path, config: Option<&Path>) -> Result<Self> {
        Self::load_with(root, config, |key| std::env::var(key).ok())
    }

    /// Like [`Settings::load`], with `env` standing in for the process
    /// environment.
    pub fn load_with(
        root: &Path,
        config: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let root = NormalizedPath::new(root);
        let store = ConfigStore::new();

        let file: SettingsFile = match config {
            Some(path) => store.load(&NormalizedPath::new(path))?,
            None => store
                .load_optional(&root.join(ProjectPath::ConfigFile.as_str()))?
                .unwrap_or_default(),
        };

        let dotenv = read_dotenv(&root.join(ProjectPath::EnvFile.as_str()))?;

        Self::resolve(file, |key| env(key).or_else(|| dotenv.get(key).cloned()))
    }

    /// Combine a parsed config file with a variable lookup.
    pub fn resolve(file: SettingsFile, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = file.credentials.source;
        let (openai_api_key, github_token) = match source {
            CredentialSource::Environment => (
                non_empty(lookup(OPENAI_API_KEY_VAR)),
                non_empty(lookup(GITHUB_API_KEY_VAR)),
            ),
            CredentialSource::Inline => (
                non_empty(file.credentials.openai_api_key.clone()),
                non_empty(file.credentials.github_token.clone()),
            ),
        };

        if file.openai.max_turns == 0 {
            return Err(Error::InvalidSetting {
                key: "openai.max_turns".into(),
                message: "must be at least 1".into(),
            });
        }
        if file.openai.timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                key: "openai.timeout_secs".into(),
                message: "must be at least 1".into(),
            });
        }
        if file.embedding.dimension == 0 {
            return Err(Error::InvalidSetting {
                key: "embedding.dimension".into(),
                message: "must be at least 1".into(),
            });
        }

        let mut overrides = HashMap::new();
        for (name, over) in file.agents {
            overrides.insert(Role::from_str(&name)?, over);
        }

        Ok(Self {
            ai_dir: file.project.ai_dir,
            credential_source: source,
            openai_api_key: openai_api_key.map(Secret::new),
            github_token: github_token.map(Secret::new),
            openai_base_url: non_empty(lookup(OPENAI_BASE_URL_VAR))
                .or(non_empty(file.openai.base_url))
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            github_api_url: non_empty(lookup(GITHUB_API_URL_VAR))
                .or(non_empty(file.github.api_url))
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_repo: non_empty(lookup(GITHUB_REPO_VAR)).or(non_empty(file.github.repo)),
            base_branch: file.github.base_branch,
            max_turns: file.openai.max_turns,
            timeout: Duration::from_secs(file.openai.timeout_secs),
            embedding: EmbeddingSettings {
                backend: file.embedding.backend,
                model: file.embedding.model,
                dimension: file.embedding.dimension,
            },
            overrides,
        })
    }

    fn missing_credential(&self, var: &str, key: &str) -> Error {
        match self.credential_source {
            CredentialSource::Environment => Error::MissingCredential {
                name: var.to_string(),
                hint: "Please add it to .env".to_string(),
            },
            CredentialSource::Inline => Error::MissingCredential {
                name: format!("credentials.{key}"),
                hint: "Please add it to forge.toml".to_string(),
            },
        }
    }

    pub fn require_openai_key(&self) -> Result<&Secret> {
        self.openai_api_key
            .as_ref()
            .ok_or_else(|| self.missing_credential(OPENAI_API_KEY_VAR, "openai_api_key"))
    }

    pub fn require_github_token(&self) -> Result<&Secret> {
        self.github_token
            .as_ref()
            .ok_or_else(|| self.missing_credential(GITHUB_API_KEY_VAR, "github_token"))
    }

    pub fn require_github_repo(&self) -> Result<&str> {
        self.github_repo.as_deref().ok_or_else(|| Error::MissingSetting {
            key: GITHUB_REPO_VAR.to_string(),
            hint: "Set it or add `repo = \"owner/name\"` under [github] in forge.toml".to_string(),
        })
    }

    pub fn layout(&self, root: &Path) -> ProjectLayout {
        ProjectLayout::new(root).with_ai_dir(self.ai_dir.clone())
    }

    /// The four agents with configured overrides applied.
    pub fn crew(&self) -> Crew {
        Crew::default().with_overrides(&self.overrides)
    }

    pub fn embedder(&self) -> Result<Box<dyn Embedder>> {
        Ok(match self.embedding.backend {
            EmbeddingBackend::Hash => Box::new(HashEmbedder::new(self.embedding.dimension)),
            EmbeddingBackend::OpenAi => Box::new(OpenAiEmbedder::new(OpenAiEmbedderConfig {
                base_url: self.openai_base_url.clone(),
                api_key: self.require_openai_key()?.expose().to_string(),
                model: self.embedding.model.clone(),
                dimension: self.embedding.dimension,
                timeout: self.timeout,
            })?),
        })
    }

    pub fn runner(&self) -> Result<OpenAiRunner> {
        Ok(OpenAiRunner::new(RunnerConfig {
            base_url: self.openai_base_url.clone(),
            api_key: self.require_openai_key()?.expose().to_string(),
            max_turns: self.max_turns,
            timeout: self.timeout,
        })?)
    }

    /// Publisher for the repository containing `root`.
    pub fn publisher(&self, root: &Path) -> Result<GitHubPublisher> {
        let client = GitHubClient::new(GitHubConfig {
            api_url: self.github_api_url.clone(),
            token: self.require_github_token()?.expose().to_string(),
            timeout: self.timeout,
        })?;
        let git = GitCli::open(root)?;
        Ok(
            GitHubPublisher::new(client, git, self.require_github_repo()?)
                .with_base(self.base_branch.clone()),
        )
    }

    /// Key/value pairs for display, secrets masked.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let secret = |s: &Option<Secret>| {
            s.as_ref()
                .map(Secret::masked)
                .unwrap_or_else(|| "(not set)".to_string())
        };
        vec![
            ("project.ai_dir", self.ai_dir.clone()),
            ("credentials.source", self.credential_source.as_str().to_string()),
            ("credentials.openai_api_key", secret(&self.openai_api_key)),
            ("credentials.github_token", secret(&self.github_token)),
            ("openai.base_url", self.openai_base_url.clone()),
            ("openai.max_turns", self.max_turns.to_string()),
            ("openai.timeout_secs", self.timeout.as_secs().to_string()),
            ("github.api_url", self.github_api_url.clone()),
            (
                "github.repo",
                self.github_repo
                    .clone()
                    .unwrap_or_else(|| "(not set)".to_string()),
            ),
            ("github.base_branch", self.base_branch.clone()),
            ("embedding.backend", self.embedding.backend.as_str().to_string()),
            ("embedding.model", self.embedding.model.clone()),
            ("embedding.dimension", self.embedding.dimension.to_string()),
        ]
    }
}
