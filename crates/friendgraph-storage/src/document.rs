//! The persisted document shape.
//!
//! The data file is a single JSON object mapping each user ID to its record,
//! with friends stored as a list of IDs:
//!
//! ```json
//! {
//!   "1": { "id": "1", "name": "Alice", "age": 30, "friends": ["2"] },
//!   "2": { "id": "2", "name": "Bob", "age": 25, "friends": ["1"] }
//! }
//! ```
//!
//! The same shape is used for loading and saving. Object order follows the
//! graph's insertion order.

use friendgraph_core::{CoreError, User, UserGraph, UserId};
use indexmap::IndexMap;

use crate::error::StorageError;

/// The decoded document: user ID to record.
pub type UserDocument = IndexMap<UserId, User>;

/// Builds the document for a graph.
pub fn to_document(graph: &UserGraph) -> UserDocument {
    graph.users().map(|u| (u.id.clone(), u.clone())).collect()
}

/// Rebuilds a graph from a document, checking that keys match record IDs
/// and that the graph invariants hold.
pub fn from_document(document: UserDocument) -> Result<UserGraph, StorageError> {
    if let Some((key, user)) = document.iter().find(|(key, user)| **key != user.id) {
        return Err(CoreError::Integrity {
            reason: format!("user stored under key {} has id {}", key, user.id),
        }
        .into());
    }
    Ok(UserGraph::from_users(document.into_values())?)
}

/// Serializes a graph to pretty-printed JSON bytes.
pub fn encode(graph: &UserGraph) -> Result<Vec<u8>, StorageError> {
    let mut bytes = serde_json::to_vec_pretty(&to_document(graph))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parses JSON bytes into a validated graph.
pub fn decode(bytes: &[u8]) -> Result<UserGraph, StorageError> {
    let document: UserDocument = serde_json::from_slice(bytes)?;
    from_document(document)
}
