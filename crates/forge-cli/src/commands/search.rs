//! The `search` command

use std::path::{Path, PathBuf};

use colored::Colorize;
use forge_core::Settings;
use forge_fs::NormalizedPath;
use forge_vector::VectorStore;

use crate::error::{CliError, Result};

/// Index `files` and print the nearest match for `query`.
///
/// Files that cannot be read are skipped with a warning. With `top`, the
/// `top` nearest files are listed with their distances.
pub fn run_search(
    root: &Path,
    config: Option<&Path>,
    query: &str,
    files: &[PathBuf],
    top: Option<usize>,
) -> Result<()> {
    if top == Some(0) {
        return Err(CliError::user("--top must be at least 1"));
    }

    let settings = Settings::load(root, config)?;
    let mut store = VectorStore::from_boxed(settings.embedder()?);

    for file in files {
        let path = NormalizedPath::new(file);
        if let Err(e) = store.add_file(&path) {
            tracing::warn!(path = %path, error = %e, "Skipping file");
        }
    }

    match top {
        Some(k) => {
            for found in store.search_top(query, k)? {
                println!(
                    "{:>10.4}  {}",
                    found.distance,
                    found.path.as_str().yellow()
                );
            }
        }
        None => println!("{}", store.search(query)?),
    }
    Ok(())
}
