//! Error types for forge-git

use std::path::PathBuf;

/// Result type for forge-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in forge-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hosting API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },

    #[error("Invalid branch name: {name}")]
    InvalidBranchName { name: String },

    #[error("Invalid repository '{repo}', expected owner/name")]
    InvalidRepository { repo: String },

    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("`git {command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
}
