use std::time::Duration;

use forge_git::{Error, GitCli, GitHubClient, GitHubConfig, GitHubPublisher, Publisher};
use forge_test_utils::{TestProject, git};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_open_outside_repository() {
    let dir = TempDir::new().unwrap();
    let err = GitCli::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::NotARepository { .. }));
}

#[test]
fn test_open_from_subdirectory_finds_root() {
    let project = TestProject::new();
    project.init_git_with_remote();
    project.write_file("backend/main.py", "print('hi')");

    let cli = GitCli::open(&project.root().join("backend")).unwrap();

    assert_eq!(
        cli.root().canonicalize().unwrap(),
        project.root().canonicalize().unwrap()
    );
}

#[test]
fn test_commit_and_push_reaches_remote() {
    let project = TestProject::new();
    project.init_git_with_remote();
    project.write_file("backend/main.py", "from fastapi import FastAPI\n");

    let server = mockito::Server::new();
    let client = GitHubClient::new(GitHubConfig {
        api_url: server.url(),
        token: "t".into(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    let publisher = GitHubPublisher::new(client, GitCli::open(project.root()).unwrap(), "acme/app");

    publisher
        .commit_and_push("ai-update-9", "AI-generated update")
        .unwrap();

    assert_eq!(git::checked_out_branch(project.root()), "ai-update-9");
    assert!(git::has_branch(project.remote(), "ai-update-9"));
    assert_eq!(
        git::last_commit_subject(project.remote(), "ai-update-9"),
        "AI-generated update"
    );
}

#[test]
fn test_commit_without_changes_fails() {
    let project = TestProject::new();
    project.init_git_with_remote();
    let cli = GitCli::open(project.root()).unwrap();

    cli.checkout("ai-update-3").unwrap();
    cli.add_all().unwrap();
    let err = cli.commit("AI-generated update").unwrap_err();

    match err {
        Error::CommandFailed { command, code, .. } => {
            assert_eq!(command, "commit -m AI-generated update");
            assert_ne!(code, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_checkout_rejects_invalid_branch() {
    let project = TestProject::new();
    project.init_git_with_remote();
    let cli = GitCli::open(project.root()).unwrap();

    let err = cli.checkout("bad..name").unwrap_err();
    assert!(matches!(err, Error::InvalidBranchName { .. }));
}

#[test]
fn test_publisher_create_branch_uses_configured_base() {
    let project = TestProject::new();
    project.init_git_with_remote();

    let mut server = mockito::Server::new();
    let head = server
        .mock("GET", "/repos/acme/app/branches/develop")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"commit": {"sha": "def456"}}).to_string())
        .create();
    let create = server
        .mock("POST", "/repos/acme/app/git/refs")
        .with_status(201)
        .with_body("{}")
        .create();

    let client = GitHubClient::new(GitHubConfig {
        api_url: server.url(),
        token: "t".into(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    let publisher = GitHubPublisher::new(client, GitCli::open(project.root()).unwrap(), "acme/app")
        .with_base("develop");

    publisher.create_branch("ai-update-5").unwrap();

    head.assert();
    create.assert();
}
