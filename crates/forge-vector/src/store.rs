//! Files ↔ ids ↔ vectors
//!
//! [`VectorStore`] keeps a mapping from file id to path next to a
//! [`FlatIndex`] holding one embedding per file. Ids come from a monotonic
//! counter and are never reused, so the two structures cannot drift apart
//! after repeated add/remove cycles.

use std::collections::BTreeMap;

use forge_fs::{NormalizedPath, io};

use crate::{Embedder, FlatIndex, Result};

/// Identifier assigned to an indexed file.
pub type FileId = u64;

/// Returned by [`SearchResult`]'s `Display` when nothing matches.
pub const NOT_FOUND: &str = "No matching file found";

/// Outcome of a single-nearest search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found(NormalizedPath),
    NotFound,
}

impl SearchResult {
    pub fn path(&self) -> Option<&NormalizedPath> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(path) => write!(f, "{}", path),
            Self::NotFound => f.write_str(NOT_FOUND),
        }
    }
}

/// One entry of a top-k search.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: FileId,
    pub path: NormalizedPath,
    pub distance: f32,
}

/// In-memory embedding index over project files.
pub struct VectorStore {
    embedder: Box<dyn Embedder>,
    index: FlatIndex,
    files: BTreeMap<FileId, NormalizedPath>,
    next_id: FileId,
}

impl VectorStore {
    pub fn new(embedder: impl Embedder + 'static) -> Self {
        Self::from_boxed(Box::new(embedder))
    }

    pub fn from_boxed(embedder: Box<dyn Embedder>) -> Self {
        let index = FlatIndex::new(embedder.dimension());
        Self {
            embedder,
            index,
            files: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Indexed paths in id order.
    pub fn paths(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.files.values()
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    fn id_of(&self, path: &NormalizedPath) -> Option<FileId> {
        self.files
            .iter()
            .find(|(_, stored)| *stored == path)
            .map(|(id, _)| *id)
    }

    /// Read a file, embed its contents and add it to the index.
    ///
    /// A path that is already indexed is replaced, so its old vector no
    /// longer participates in searches. On error the store is unchanged.
    pub fn add_file(&mut self, path: &NormalizedPath) -> Result<FileId> {
        let content = io::read_text(path)?;
        let vector = self.embedder.embed(&content)?;

        let id = self.next_id;
        self.index.add(id, &vector)?;

        if let Some(previous) = self.id_of(path) {
            self.index.remove(previous);
            self.files.remove(&previous);
        }
        self.files.insert(id, path.clone());
        self.next_id += 1;

        tracing::info!(path = %path, id, "Indexed file");
        Ok(id)
    }

    /// Drop a file from the index. Returns the id it had, if any.
    pub fn remove_file(&mut self, path: &NormalizedPath) -> Option<FileId> {
        match self.id_of(path) {
            Some(id) => {
                self.index.remove(id);
                self.files.remove(&id);
                tracing::info!(path = %path, id, "Removed file from index");
                Some(id)
            }
            None => {
                tracing::info!(path = %path, "File not found in index");
                None
            }
        }
    }

    /// The single file closest to `query`.
    pub fn search(&self, query: &str) -> Result<SearchResult> {
        let nearest = self.search_top(query, 1)?;
        Ok(match nearest.into_iter().next() {
            Some(m) => SearchResult::Found(m.path),
            None => SearchResult::NotFound,
        })
    }

    /// The `k` files closest to `query`, nearest first.
    pub fn search_top(&self, query: &str, k: usize) -> Result<Vec<Match>> {
        if self.index.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query)?;
        let hits = self.index.search(&vector, k)?;

        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                self.files.get(&hit.id).map(|path| Match {
                    id: hit.id,
                    path: path.clone(),
                    distance: hit.distance,
                })
            })
            .collect())
    }

    /// Write `content` to `path`, then index it.
    ///
    /// Write failures are returned. Indexing failures are logged and
    /// reported as `Ok(None)`: the file is on disk either way.
    pub fn save_to_project(
        &mut self,
        path: &NormalizedPath,
        content: &str,
    ) -> Result<Option<FileId>> {
        io::write_text(path, content)?;
        tracing::info!(path = %path, "AI created/modified file");

        match self.add_file(path) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Could not index file");
                Ok(None)
            }
        }
    }

    /// Delete a file from disk and from the index.
    ///
    /// Returns `false` and leaves the index untouched when the file does not exist.
    pub fn delete_file(&mut self, path: &NormalizedPath) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        io::remove_file(path)?;
        self.remove_file(path);
        tracing::info!(path = %path, "AI deleted file");
        Ok(true)
    }
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("embedder", &self.embedder.name())
            .field("files", &self.files)
            .field("next_id", &self.next_id)
            .finish()
    }
}
