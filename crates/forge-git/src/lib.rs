//! Source control for agentforge
//!
//! Derives the update branch name, creates the branch through the hosting
//! API and publishes local changes with the `git` executable.

pub mod cli;
pub mod error;
pub mod github;
pub mod naming;
pub mod publish;

pub use cli::GitCli;
pub use error::{Error, Result};
pub use github::{GitHubClient, GitHubConfig};
pub use naming::{BRANCH_PREFIX, branch_name_for_pid, current_branch_name};
pub use publish::{GitHubPublisher, Publisher};
