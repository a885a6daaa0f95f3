//! The `git` executable
//!
//! Local publishing shells out to `git` in the project root so the user's
//! own credential helpers and hooks apply.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;

use crate::naming::validate_branch_name;
use crate::{Error, Result};

/// Runs `git` subcommands in a working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Open the working tree containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| Error::NotARepository {
            path: path.to_path_buf(),
        })?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::NotARepository {
                path: path.to_path_buf(),
            })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `git <args>` and return its stdout.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(args = ?args, "Running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(Error::CommandFailed {
                command: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Switch to `branch`, creating or resetting it at the current commit.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        validate_branch_name(branch)?;
        self.run(&["checkout", "-B", branch])?;
        Ok(())
    }

    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "."])?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message])?;
        Ok(())
    }

    /// Push `branch` to `origin` and set it as upstream.
    pub fn push(&self, branch: &str) -> Result<()> {
        self.run(&["push", "-u", "origin", branch])?;
        Ok(())
    }
}
