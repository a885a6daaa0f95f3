//! The `agents` command

use std::path::Path;

use colored::Colorize;
use forge_agent::Tool;
use forge_core::Settings;
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct AgentEntry<'a> {
    role: &'static str,
    name: &'a str,
    model: &'a str,
    instructions: &'a str,
    tools: &'a [Tool],
}

pub fn run_agents(root: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let settings = Settings::load(root, config)?;
    let crew = settings.crew();

    if json {
        let entries: Vec<AgentEntry<'_>> = crew
            .iter()
            .map(|(role, agent)| AgentEntry {
                role: role.as_str(),
                name: &agent.name,
                model: &agent.model,
                instructions: &agent.instructions,
                tools: &agent.tools,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "Agent Crew".bold());
    for (role, agent) in crew.iter() {
        let tools: Vec<&str> = agent.tools.iter().map(Tool::as_str).collect();
        println!();
        println!(
            "  {} {} ({})",
            agent.name.green().bold(),
            format!("[{role}]").dimmed(),
            agent.model.cyan()
        );
        println!("    {}", agent.instructions);
        println!("    tools: {}", tools.join(", "));
    }
    Ok(())
}
