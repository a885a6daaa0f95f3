//! Agent descriptors

use serde::{Deserialize, Serialize};

/// A tool an agent may use during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Hosted web search
    WebSearch,
    /// Screen/keyboard/mouse control through a [`crate::Computer`]
    Computer,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebSearch => "web_search",
            Self::Computer => "computer",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Display name (e.g., "Backend Developer")
    pub name: String,
    /// System instructions sent with every request
    pub instructions: String,
    /// Model identifier (e.g., "o3-mini")
    pub model: String,
    /// Tools available during a run
    pub tools: Vec<Tool>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: impl Into<String>,
        tools: Vec<Tool>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: model.into(),
            tools,
        }
    }

    pub fn has_tool(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }
}
