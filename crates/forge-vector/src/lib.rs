//! File embedding and similarity search for agentforge
//!
//! Every file the agents write is embedded and appended to a flat
//! (brute-force) L2 index, so later steps can ask which generated file is
//! closest to a query.
//!
//! - [`embed`]: the [`Embedder`] trait with a remote and a local backend
//! - [`flat`]: the exact [`FlatIndex`]
//! - [`store`]: [`VectorStore`], which ties files, ids and vectors together

pub mod embed;
pub mod error;
pub mod flat;
pub mod store;

pub use embed::{Embedder, HashEmbedder, OpenAiEmbedder, OpenAiEmbedderConfig};
pub use error::{Error, Result};
pub use flat::{FlatIndex, Hit};
pub use store::{FileId, Match, NOT_FOUND, SearchResult, VectorStore};

/// Dimension of the default embedding space.
pub const DEFAULT_DIMENSION: usize = 384;

/// Model used by [`OpenAiEmbedder`] unless configured otherwise.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
