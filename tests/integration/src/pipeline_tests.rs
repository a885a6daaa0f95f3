//! End-to-end pipeline tests
//!
//! The real runner, embedder and publisher run against mock OpenAI and
//! GitHub servers. Pushes go to a bare repository on disk.

use forge_core::{MemoryLog, Pipeline, Settings, SettingsFile};
use forge_fs::{ProjectPath, io};
use forge_test_utils::{TestProject, git};
use forge_vector::{SearchResult, VectorStore};
use mockito::{Matcher, Mock, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;

const BACKEND_CODE: &str = "from fastapi import FastAPI\n\napp = FastAPI()\n";
const WEB_CODE: &str = "export default function Home() {\n  return <h1>Hello</h1>\n}\n";

fn settings(openai: &ServerGuard, github: &ServerGuard, backend: &str) -> Settings {
    let file: SettingsFile = toml::from_str(&format!(
        r#"
        [credentials]
        source = "inline"
        openai_api_key = "sk-test"
        github_token = "ghp-test"

        [openai]
        base_url = "{}"
        max_turns = 3
        timeout_secs = 10

        [github]
        repo = "acme/app"
        api_url = "{}"

        [embedding]
        backend = "{backend}"
        dimension = 8
        "#,
        openai.url(),
        github.url()
    ))
    .unwrap();
    Settings::resolve(file, |_| None).unwrap()
}

fn respond(server: &mut ServerGuard, prompt: &str, text: &str) -> Mock {
    server
        .mock("POST", "/responses")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({ "input": prompt })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": format!("resp-{}", prompt.len()),
                "output": [{
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "output_text", "text": text}]
                }]
            })
            .to_string(),
        )
        .create()
}

fn script_crew(server: &mut ServerGuard, test_output: &str) -> Vec<Mock> {
    vec![
        respond(server, "Start development. Assign tasks.", "Tasks assigned."),
        respond(server, "Generate FastAPI backend code.", BACKEND_CODE),
        respond(server, "Generate React/Next.js frontend.", WEB_CODE),
        respond(server, "Run backend tests.", test_output),
    ]
}

fn mock_github(server: &mut ServerGuard, branch: &str) -> (Mock, Mock) {
    let head = server
        .mock("GET", "/repos/acme/app/branches/main")
        .match_header("authorization", "Bearer ghp-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"name": "main", "commit": {"sha": "0123abcd"}}).to_string())
        .create();
    let create = server
        .mock("POST", "/repos/acme/app/git/refs")
        .match_body(Matcher::Json(json!({
            "ref": format!("refs/heads/{branch}"),
            "sha": "0123abcd"
        })))
        .with_status(201)
        .with_body("{}")
        .create();
    (head, create)
}

#[test]
fn test_full_run_publishes_to_remote() {
    let project = TestProject::new();
    project.init_git_with_remote();

    let mut openai = mockito::Server::new();
    let mut github = mockito::Server::new();
    let crew_mocks = script_crew(&mut openai, "===== 3 passed in 0.12s =====");
    let (head, create) = mock_github(&mut github, "ai-update-1001");

    let settings = settings(&openai, &github, "hash");
    let log = MemoryLog::new();
    let mut pipeline = Pipeline::new(
        settings.layout(project.root()),
        settings.crew(),
        settings.runner().unwrap(),
        VectorStore::from_boxed(settings.embedder().unwrap()),
        &log,
    )
    .with_publisher(settings.publisher(project.root()).unwrap())
    .with_branch("ai-update-1001");

    let report = pipeline.run().unwrap();

    for mock in &crew_mocks {
        mock.assert();
    }
    head.assert();
    create.assert();

    assert!(report.tests_passed);
    assert_eq!(report.plan, "Tasks assigned.");
    assert_eq!(report.published_branch.as_deref(), Some("ai-update-1001"));

    project.assert_file_contains("backend/main.py", "FastAPI()");
    project.assert_file_contains("web_app/index.js", "Hello");
    project.assert_file_contains("backend/test_results.log", "3 passed");

    assert_eq!(git::checked_out_branch(project.root()), "ai-update-1001");
    assert!(git::has_branch(project.remote(), "ai-update-1001"));
    assert_eq!(
        git::last_commit_subject(project.remote(), "ai-update-1001"),
        "AI-generated update"
    );

    let lines = log.lines();
    assert!(lines.contains(&"[GitHub] Created new branch: ai-update-1001".to_string()));
    assert!(lines.contains(&"[GitHub] Pushed changes to ai-update-1001".to_string()));
    assert_eq!(log.last().as_deref(), Some("[+] AI Development Complete!"));
}

#[test]
fn test_failed_tests_leave_remote_untouched() {
    let project = TestProject::new();
    project.init_git_with_remote();

    let mut openai = mockito::Server::new();
    let mut github = mockito::Server::new();
    script_crew(&mut openai, "FAILED test_main.py::test_read_root - AssertionError");
    let head = github
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let settings = settings(&openai, &github, "hash");
    let log = MemoryLog::new();
    let mut pipeline = Pipeline::new(
        settings.layout(project.root()),
        settings.crew(),
        settings.runner().unwrap(),
        VectorStore::from_boxed(settings.embedder().unwrap()),
        &log,
    )
    .with_publisher(settings.publisher(project.root()).unwrap())
    .with_branch("ai-update-1002");

    let report = pipeline.run().unwrap();

    head.assert();
    assert!(!report.tests_passed);
    assert_eq!(report.published_branch, None);
    assert_eq!(git::checked_out_branch(project.root()), "main");
    assert!(!git::has_branch(project.remote(), "ai-update-1002"));
    assert!(
        log.lines()
            .contains(&"[-] Tests failed. AI will request fixes.".to_string())
    );
    project.assert_file_contains("backend/test_results.log", "FAILED");
}

#[test]
fn test_run_with_remote_embeddings_indexes_outputs() {
    let project = TestProject::new();

    let mut openai = mockito::Server::new();
    let crew_mocks = script_crew(&mut openai, "ok");
    let github = mockito::Server::new();

    let embed = |server: &mut ServerGuard, input: &str, vector: [f32; 8]| {
        server
            .mock("POST", "/embeddings")
            .match_body(Matcher::PartialJson(json!({
                "model": "text-embedding-3-small",
                "input": input,
                "dimensions": 8
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": [{"embedding": vector}]}).to_string())
            .create()
    };
    let embeddings = vec![
        embed(&mut openai, BACKEND_CODE, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        embed(&mut openai, WEB_CODE, [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        embed(&mut openai, "ok", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        embed(&mut openai, "python api", [0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ];

    let settings = settings(&openai, &github, "openai");
    let log = MemoryLog::new();
    let mut pipeline = Pipeline::new(
        settings.layout(project.root()),
        settings.crew(),
        settings.runner().unwrap(),
        VectorStore::from_boxed(settings.embedder().unwrap()),
        &log,
    );
    let report = pipeline.run().unwrap();
    let store = pipeline.into_store();

    for mock in crew_mocks.iter().chain(&embeddings[..3]) {
        mock.assert();
    }
    assert_eq!(store.len(), 3);

    let layout = settings.layout(project.root());
    assert_eq!(
        store.search("python api").unwrap(),
        SearchResult::Found(layout.path(ProjectPath::BackendMain))
    );
    embeddings[3].assert();
    assert_eq!(report.files[0], layout.path(ProjectPath::BackendMain));
}

#[test]
fn test_delete_generated_file_removes_it_from_index() {
    let project = TestProject::new();

    let mut openai = mockito::Server::new();
    script_crew(&mut openai, "ok");
    let github = mockito::Server::new();

    let settings = settings(&openai, &github, "hash");
    let log = MemoryLog::new();
    let mut pipeline = Pipeline::new(
        settings.layout(project.root()),
        settings.crew(),
        settings.runner().unwrap(),
        VectorStore::from_boxed(settings.embedder().unwrap()),
        &log,
    );
    pipeline.run().unwrap();
    let mut store = pipeline.into_store();

    let backend = settings.layout(project.root()).path(ProjectPath::BackendMain);
    assert_eq!(
        store.search(BACKEND_CODE).unwrap(),
        SearchResult::Found(backend.clone())
    );

    assert!(store.delete_file(&backend).unwrap());
    project.assert_file_not_exists("backend/main.py");
    assert_ne!(
        store.search(BACKEND_CODE).unwrap(),
        SearchResult::Found(backend.clone())
    );
    assert!(!store.delete_file(&backend).unwrap());
    assert!(!io::remove_file(&backend).unwrap());
}
