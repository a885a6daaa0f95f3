//! Error types for agent operations

/// Errors that can occur while running agents
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Transport-level failure talking to the model API
    #[error("Agent request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API answered with a non-success status
    #[error("Model API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The run did not produce a final answer within the turn limit
    #[error("Agent '{agent}' exceeded {max_turns} turns without a final answer")]
    MaxTurnsExceeded { agent: String, max_turns: usize },

    /// The model asked for a tool the agent was not given
    #[error("Agent '{agent}' requested tool '{tool}' which it does not have")]
    ToolNotEnabled { agent: String, tool: String },

    /// A role name that does not match any crew member
    #[error("Unknown role '{0}'. Expected one of: project_manager, backend, desktop, web")]
    UnknownRole(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
