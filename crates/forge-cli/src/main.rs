//! agentforge CLI
//!
//! Runs the AI development crew against a project and exposes the file
//! index and settings for inspection.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialise logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.root, cli.config.as_deref()),
        None => {
            println!("{} agentforge CLI", "forge".green().bold());
            println!();
            println!("Run {} for available commands.", "forge --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(
    cmd: Commands,
    root: &std::path::Path,
    config: Option<&std::path::Path>,
) -> Result<()> {
    match cmd {
        Commands::Run { no_publish } => commands::run_pipeline(root, config, !no_publish),
        Commands::Agents { json } => commands::run_agents(root, config, json),
        Commands::Search { query, files, top } => {
            commands::run_search(root, config, &query, &files, top)
        }
        Commands::BranchName { pid } => commands::run_branch_name(pid),
        Commands::Config { json } => commands::run_config(root, config, json),
    }
}
