use forge_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("backend/main.py");

    io::write_atomic(&path, b"print('hi')").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "print('hi')");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("index.js");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("out.txt");

    io::write_text(&path, "done").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["out.txt".to_string()]);
}

#[test]
fn test_write_atomic_failed_rename_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    // a non-empty directory in the way makes the final rename fail
    fs::create_dir_all(temp.path().join("backend/keep")).unwrap();
    let path = NormalizedPath::new(temp.path()).join("backend");

    let result = io::write_text(&path, "print('hi')");

    assert!(matches!(result, Err(forge_fs::Error::Io { .. })));
    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["backend".to_string()]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let result = io::read_text(&path);
    assert!(matches!(result, Err(forge_fs::Error::Io { .. })));
}

#[test]
fn test_append_line_accumulates() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("AI/forge.log");

    io::append_line(&path, "first").unwrap();
    io::append_line(&path, "second").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "first\nsecond\n");
}

#[test]
fn test_remove_file_reports_absence() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("gone.txt");

    assert!(!io::remove_file(&path).unwrap());

    io::write_text(&path, "x").unwrap();
    assert!(io::remove_file(&path).unwrap());
    assert!(!path.exists());
}
