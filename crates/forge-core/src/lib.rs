//! Core orchestration for agentforge
//!
//! Resolves [`Settings`] from `forge.toml`, `.env` and the environment, and
//! runs the development [`Pipeline`]: the crew generates code, every output
//! is written and indexed, and a passing test run is published to a branch.

pub mod error;
pub mod log;
pub mod pipeline;
pub mod settings;
pub mod verdict;

pub use error::{Error, Result};
pub use log::{ConsoleLog, LogWindow, MemoryLog};
pub use pipeline::{COMMIT_MESSAGE, Pipeline, PipelineReport};
pub use settings::{
    CredentialSource, EmbeddingBackend, EmbeddingSettings, Secret, Settings, SettingsFile,
};
pub use verdict::tests_passed;
