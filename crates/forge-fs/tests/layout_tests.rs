use forge_fs::{NormalizedPath, ProjectLayout, ProjectPath};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
#[case(ProjectPath::BackendMain, "/work/backend/main.py")]
#[case(ProjectPath::WebAppIndex, "/work/web_app/index.js")]
#[case(ProjectPath::TestResults, "/work/backend/test_results.log")]
#[case(ProjectPath::AiDir, "/work/AI")]
fn test_well_known_paths(#[case] which: ProjectPath, #[case] expected: &str) {
    let layout = ProjectLayout::new("/work");
    assert_eq!(layout.path(which).as_str(), expected);
}

#[test]
fn test_custom_ai_dir() {
    let layout = ProjectLayout::new("/work").with_ai_dir("agent-runs");
    assert_eq!(layout.path(ProjectPath::AiDir).as_str(), "/work/agent-runs");
}

#[test]
fn test_prepare_creates_ai_dir() {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(NormalizedPath::new(temp.path()));

    layout.prepare().unwrap();

    assert!(temp.path().join("AI").is_dir());
}
