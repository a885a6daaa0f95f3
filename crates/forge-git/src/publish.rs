//! Publishing generated changes

use crate::{GitCli, GitHubClient, Result};

/// Creates the update branch remotely and pushes local changes to it.
pub trait Publisher {
    /// Create `branch` on the remote.
    fn create_branch(&self, branch: &str) -> Result<()>;

    /// Check out `branch`, stage everything, commit with `message` and push.
    fn commit_and_push(&self, branch: &str, message: &str) -> Result<()>;
}

/// [`Publisher`] that branches through the GitHub API and pushes with `git`.
#[derive(Debug, Clone)]
pub struct GitHubPublisher {
    client: GitHubClient,
    git: GitCli,
    repo: String,
    base: String,
}

impl GitHubPublisher {
    /// `repo` is `owner/name`; new branches start from `main`.
    pub fn new(client: GitHubClient, git: GitCli, repo: impl Into<String>) -> Self {
        Self {
            client,
            git,
            repo: repo.into(),
            base: "main".to_string(),
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }
}

impl Publisher for GitHubPublisher {
    fn create_branch(&self, branch: &str) -> Result<()> {
        self.client.create_branch(&self.repo, branch, &self.base)?;
        Ok(())
    }

    fn commit_and_push(&self, branch: &str, message: &str) -> Result<()> {
        self.git.checkout(branch)?;
        self.git.add_all()?;
        self.git.commit(message)?;
        self.git.push(branch)?;
        tracing::info!(branch = %branch, "Pushed changes");
        Ok(())
    }
}
