//! The `run` command

use std::path::Path;

use colored::Colorize;
use forge_core::{ConsoleLog, Pipeline, PipelineReport, Settings};
use forge_vector::VectorStore;

use crate::error::Result;

/// Name of the session log inside the AI directory.
const SESSION_LOG: &str = "forge.log";

pub fn run_pipeline(root: &Path, config: Option<&Path>, publish: bool) -> Result<()> {
    let settings = Settings::load(root, config)?;
    let layout = settings.layout(root);

    let runner = settings.runner()?;
    let store = VectorStore::from_boxed(settings.embedder()?);
    let log = ConsoleLog::new().with_mirror(layout.ai_dir().join(SESSION_LOG));

    tracing::debug!(
        root = %layout.root(),
        embedder = store.embedder_name(),
        publish,
        "Starting pipeline"
    );

    let pipeline = Pipeline::new(layout, settings.crew(), runner, store, &log);
    let mut pipeline = if publish {
        pipeline.with_publisher(settings.publisher(root)?)
    } else {
        pipeline
    };

    let report = pipeline.run()?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &PipelineReport) {
    println!();
    for file in &report.files {
        println!("{} {}", "=>".blue().bold(), file.as_str().yellow());
    }
    match (&report.published_branch, report.tests_passed) {
        (Some(branch), _) => {
            println!("{} Published to {}", "OK".green().bold(), branch.cyan())
        }
        (None, true) => println!("{} Tests passed, nothing published", "OK".green().bold()),
        (None, false) => println!("{} Tests failed, nothing published", "!!".red().bold()),
    }
}
