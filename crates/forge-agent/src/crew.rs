//! The four canned roles

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Agent, AgentError, Tool};

/// A crew position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectManager,
    Backend,
    Desktop,
    Web,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::ProjectManager, Role::Backend, Role::Desktop, Role::Web];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectManager => "project_manager",
            Self::Backend => "backend",
            Self::Desktop => "desktop",
            Self::Web => "web",
        }
    }

    fn default_agent(&self) -> Agent {
        let (name, instructions, model) = match self {
            Self::ProjectManager => (
                "Project Manager",
                "Manage AI project development, review code, and approve PRs.",
                "o3-mini",
            ),
            Self::Backend => (
                "Backend Developer",
                "Develop a FastAPI backend, create endpoints, and database models.",
                "o3-mini",
            ),
            Self::Desktop => (
                "Desktop App Developer",
                "Develop a PyQt/Electron desktop app and ensure API integration.",
                "gpt-4-turbo-2024-04-09",
            ),
            Self::Web => (
                "Web App Developer",
                "Develop a React or Next.js web app and connect to the backend.",
                "gpt-4-turbo-2024-04-09",
            ),
        };
        Agent::new(name, instructions, model, shared_tools())
    }
}

impl FromStr for Role {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "project_manager" | "pm" => Ok(Self::ProjectManager),
            "backend" => Ok(Self::Backend),
            "desktop" => Ok(Self::Desktop),
            "web" => Ok(Self::Web),
            _ => Err(AgentError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tools every crew member gets.
pub fn shared_tools() -> Vec<Tool> {
    vec![Tool::WebSearch, Tool::Computer]
}

/// Per-role replacement of model and/or instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOverride {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// The four agents, one per [`Role`].
#[derive(Debug, Clone)]
pub struct Crew {
    members: HashMap<Role, Agent>,
}

impl Default for Crew {
    fn default() -> Self {
        Self {
            members: Role::ALL
                .iter()
                .map(|role| (*role, role.default_agent()))
                .collect(),
        }
    }
}

impl Crew {
    /// Apply overrides on top of the defaults.
    pub fn with_overrides(mut self, overrides: &HashMap<Role, RoleOverride>) -> Self {
        for (role, over) in overrides {
            if let Some(agent) = self.members.get_mut(role) {
                if let Some(model) = &over.model {
                    agent.model = model.clone();
                }
                if let Some(instructions) = &over.instructions {
                    agent.instructions = instructions.clone();
                }
            }
        }
        self
    }

    pub fn get(&self, role: Role) -> &Agent {
        // every role is inserted at construction
        &self.members[&role]
    }

    /// Members in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &Agent)> {
        Role::ALL.iter().map(|role| (*role, self.get(*role)))
    }
}
