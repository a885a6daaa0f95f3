//! Filesystem helpers for agentforge
//!
//! Provides the project layout (`AI/`, `backend/`, `web_app/`), normalized
//! paths, atomic text writes and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use layout::{ProjectLayout, ProjectPath};
pub use path::NormalizedPath;
