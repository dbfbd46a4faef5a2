//! In-memory implementation of [`UserStore`].
//!
//! [`InMemoryStore`] keeps the last saved document as bytes, going through
//! the same encode/decode path as [`JsonFileStore`](crate::JsonFileStore).
//! Used by tests and by servers started without a data file.

use friendgraph_core::UserGraph;

use crate::document;
use crate::error::StorageError;
use crate::traits::UserStore;

/// A [`UserStore`] holding its document in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    document: Option<Vec<u8>>,
    saves: usize,
}

impl InMemoryStore {
    /// Creates a store with no document; loading yields an empty graph.
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// Creates a store whose document already holds `graph`.
    pub fn with_graph(graph: &UserGraph) -> Result<Self, StorageError> {
        Ok(InMemoryStore {
            document: Some(document::encode(graph)?),
            saves: 0,
        })
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl UserStore for InMemoryStore {
    fn load(&self) -> Result<UserGraph, StorageError> {
        match &self.document {
            Some(bytes) => document::decode(bytes),
            None => Ok(UserGraph::new()),
        }
    }

    fn save(&mut self, graph: &UserGraph) -> Result<(), StorageError> {
        self.document = Some(document::encode(graph)?);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
