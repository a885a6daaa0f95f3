//! The run log window
//!
//! Pipeline progress goes to a [`LogWindow`]: a sink that appends one line
//! at a time and always shows the latest line.

use std::cell::RefCell;

use colored::Colorize;
use forge_fs::{NormalizedPath, io};

/// Append-only view of pipeline progress.
pub trait LogWindow {
    fn append(&self, line: &str);
}

/// Terminal log window.
///
/// Prints each line with a color chosen by its marker and, when a mirror
/// file is set, appends it with a timestamp (usually `AI/forge.log`).
#[derive(Debug, Default)]
pub struct ConsoleLog {
    mirror: Option<NormalizedPath>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mirror(mut self, path: NormalizedPath) -> Self {
        self.mirror = Some(path);
        self
    }

    fn colorize(line: &str) -> String {
        if line.starts_with("[+]") {
            line.green().to_string()
        } else if line.starts_with("[-]") {
            line.red().bold().to_string()
        } else if line.starts_with("[GitHub]") {
            line.cyan().to_string()
        } else {
            line.to_string()
        }
    }
}

impl LogWindow for ConsoleLog {
    fn append(&self, line: &str) {
        println!("{}", Self::colorize(line));

        if let Some(mirror) = &self.mirror {
            let stamped = format!("{} {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"), line);
            if let Err(e) = io::append_line(mirror, &stamped) {
                tracing::warn!(path = %mirror, error = %e, "Could not mirror log line");
            }
        }
    }
}

/// In-memory log window.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: RefCell<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// The most recent line.
    pub fn last(&self) -> Option<String> {
        self.lines.borrow().last().cloned()
    }
}

impl LogWindow for MemoryLog {
    fn append(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_log_keeps_order() {
        let log = MemoryLog::new();
        log.append("one");
        log.append("two");
        assert_eq!(log.lines(), vec!["one", "two"]);
        assert_eq!(log.last().as_deref(), Some("two"));
    }

    #[test]
    fn test_console_log_mirrors_to_file() {
        let dir = TempDir::new().unwrap();
        let mirror = NormalizedPath::new(dir.path()).join("AI/forge.log");
        let log = ConsoleLog::new().with_mirror(mirror.clone());

        log.append("[+] Running tests...");
        log.append("[-] Tests failed. AI will request fixes.");

        let content = io::read_text(&mirror).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" [+] Running tests..."));
        assert!(lines[1].ends_with(" [-] Tests failed. AI will request fixes."));
    }

    #[test]
    fn test_colorize_leaves_text_intact() {
        colored::control::set_override(false);
        assert_eq!(ConsoleLog::colorize("[GitHub] x"), "[GitHub] x");
        assert_eq!(ConsoleLog::colorize("plain"), "plain");
    }
}
