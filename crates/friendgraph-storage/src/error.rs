//! Storage error types for friendgraph-storage.
//!
//! [`StorageError`] covers reading and writing the data document, decoding
//! it, and rejecting documents whose contents break a graph invariant.

use std::path::PathBuf;

use friendgraph_core::CoreError;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the data document failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document decoded but describes an inconsistent graph.
    #[error("invalid document: {0}")]
    Integrity(#[from] CoreError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
