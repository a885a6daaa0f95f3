//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// agentforge - run an AI development crew against a project
#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to <root>/forge.toml)
    #[arg(long, global = true, env = "FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the full development pipeline
    ///
    /// The project manager assigns tasks, the backend and web agents write
    /// code, the backend agent runs the tests, and passing changes are
    /// pushed to a new `ai-update-<pid>` branch.
    Run {
        /// Write and index files but skip branch creation and push
        #[arg(long)]
        no_publish: bool,
    },

    /// List the agent crew
    Agents {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Index files and print the one closest to a query
    ///
    /// Examples:
    ///   forge search "fastapi app" backend/main.py web_app/index.js
    ///   forge search -k 3 "test output" backend/*.py
    Search {
        /// Text to search for
        query: String,

        /// Files to index
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show the K nearest files with distances
        #[arg(short = 'k', long)]
        top: Option<usize>,
    },

    /// Print the branch name a run would publish to
    BranchName {
        /// Derive the name from this process id instead of the current one
        #[arg(long)]
        pid: Option<u32>,
    },

    /// Show resolved settings with secrets masked
    Config {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
