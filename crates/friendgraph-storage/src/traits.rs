//! The [`UserStore`] trait defining the persistence contract for the graph.
//!
//! A store always deals in whole graphs: `load` rebuilds the complete
//! [`UserGraph`] and `save` overwrites the complete document. Callers decide
//! when to save; the server does it while holding its write lock so a save
//! never captures a half-applied mutation.

use friendgraph_core::UserGraph;

use crate::error::StorageError;

/// The storage contract for the user graph.
///
/// The trait is synchronous and implementations do blocking I/O. The server
/// calls `save` on the async runtime while holding its write lock, so every
/// request waits for the write to finish; documents are expected to stay
/// small. Move saves to `spawn_blocking` before pointing a store at slow
/// storage.
pub trait UserStore: Send + Sync {
    /// Reads the stored document and rebuilds the graph.
    ///
    /// Fails if the document is missing, unreadable, malformed, or violates
    /// a graph invariant.
    fn load(&self) -> Result<UserGraph, StorageError>;

    /// Overwrites the stored document with the given graph.
    fn save(&mut self, graph: &UserGraph) -> Result<(), StorageError>;

    /// Human-readable location of the document, for logs.
    fn location(&self) -> String;
}
