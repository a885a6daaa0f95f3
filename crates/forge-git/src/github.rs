//! Hosting API client
//!
//! Only the two calls needed to branch off `main`: read a branch head and
//! create a ref.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use crate::naming::validate_branch_name;
use crate::{Error, Result};

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base, e.g. `https://api.github.com`
    pub api_url: String,
    pub token: String,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct BranchBody {
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

/// Blocking client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
}

fn validate_repo(repo: &str) -> Result<()> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(Error::InvalidRepository {
            repo: repo.to_string(),
        }),
    }
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("agentforge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Commit sha at the head of `branch`.
    pub fn branch_head(&self, repo: &str, branch: &str) -> Result<String> {
        validate_repo(repo)?;
        let url = format!("{}/repos/{}/branches/{}", self.api_url, repo, branch);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::BranchNotFound {
                name: branch.to_string(),
            });
        }

        let body: BranchBody = Self::check(response)?.json()?;
        Ok(body.commit.sha)
    }

    /// Create `refs/heads/<branch>` pointing at `sha`.
    pub fn create_ref(&self, repo: &str, branch: &str, sha: &str) -> Result<()> {
        validate_repo(repo)?;
        validate_branch_name(branch)?;
        let url = format!("{}/repos/{}/git/refs", self.api_url, repo);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .json(&json!({
                "ref": format!("refs/heads/{branch}"),
                "sha": sha,
            }))
            .send()?;

        Self::check(response)?;
        tracing::debug!(repo, branch, sha, "Created ref");
        Ok(())
    }

    /// Create `branch` at the current head of `base`. Returns the sha.
    pub fn create_branch(&self, repo: &str, branch: &str, base: &str) -> Result<String> {
        let sha = self.branch_head(repo, base)?;
        self.create_ref(repo, branch, &sha)?;
        tracing::info!(repo, branch = %branch, base, "Created remote branch");
        Ok(sha)
    }
}
