//! Error types for forge-vector

/// Result type for forge-vector operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while embedding or indexing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] forge_fs::Error),

    #[error("Embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Embedding API returned no vectors")]
    EmptyResponse,

    #[error("Invalid vector dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
