//! Git repository fixtures.
//!
//! Publishing tests need two things: a working repository with at least one
//! commit on `main`, and somewhere to push to. The remote is a bare
//! repository on the local filesystem, so no network is involved.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialises a real git repository with an initial commit on `main`.
///
/// Configures a local identity and disables signing so commits made by the
/// code under test succeed on any machine.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "."]);
    run_git(path, &["commit", "-m", "Initial commit"]);
    run_git(path, &["branch", "-M", "main"]);
}

/// Initialises a bare repository to act as a push target.
///
/// # Panics
/// Panics if `git2::Repository::init_bare` fails.
pub fn bare_remote(path: &Path) -> git2::Repository {
    git2::Repository::init_bare(path).unwrap_or_else(|e| {
        panic!(
            "bare_remote: failed to init bare repository at {}: {e}",
            path.display()
        )
    })
}

/// Registers `remote` as `origin` of the repository at `path`.
///
/// # Panics
/// Panics if the remote cannot be added.
pub fn add_origin(path: &Path, remote: &Path) {
    let remote = remote.to_string_lossy();
    run_git(path, &["remote", "add", "origin", remote.as_ref()]);
}

/// Name of the branch checked out at `path`.
pub fn checked_out_branch(path: &Path) -> String {
    run_git(path, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Subject line of the latest commit at `path` (any repository, bare included).
pub fn last_commit_subject(path: &Path, rev: &str) -> String {
    run_git(path, &["log", "-1", "--format=%s", rev])
}

/// Whether the repository at `path` has a local branch called `name`.
pub fn has_branch(path: &Path, name: &str) -> bool {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("has_branch: cannot open {}: {e}", path.display()));
    repo.find_branch(name, git2::BranchType::Local).is_ok()
}
