//! Error types for forge-core

/// Result type for forge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in forge-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A secret the requested operation needs was not provided
    #[error("{name} is not set. {hint}")]
    MissingCredential { name: String, hint: String },

    /// A non-secret setting the requested operation needs was not provided
    #[error("{key} is not set. {hint}")]
    MissingSetting { key: String, hint: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidSetting { key: String, message: String },

    #[error("Failed to read .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Fs(#[from] forge_fs::Error),

    #[error(transparent)]
    Vector(#[from] forge_vector::Error),

    #[error(transparent)]
    Agent(#[from] forge_agent::AgentError),

    #[error(transparent)]
    Git(#[from] forge_git::Error),
}
