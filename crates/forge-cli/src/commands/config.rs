//! The `config` command

use std::path::Path;

use colored::Colorize;
use forge_core::Settings;
use serde_json::{Map, Value};

use crate::error::Result;

pub fn run_config(root: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let settings = Settings::load(root, config)?;
    let entries = settings.entries();

    if json {
        let map: Map<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
        return Ok(());
    }

    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in entries {
        println!("{}  {}", format!("{key:width$}").cyan(), value);
    }
    Ok(())
}
