//! Shared test utilities for the agentforge workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] : git repository fixtures (working repo with history, bare remote)
//! - [`project`] : [`TestProject`] builder for a scratch project root

pub mod git;
pub mod project;

pub use project::TestProject;
