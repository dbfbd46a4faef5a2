//! Core error types for friendgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! every way a graph operation can be rejected. A rejected operation never
//! leaves a partial change behind.

use crate::id::UserId;
use thiserror::Error;

/// Core errors produced by [`UserGraph`](crate::graph::UserGraph) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The operation targets a user that is not in the store.
    #[error("user {id} doesn't exist in the store")]
    UserNotFound { id: UserId },

    /// A new user lists a friend that is not in the store.
    #[error("friend {id} doesn't exist in the store")]
    UnknownFriend { id: UserId },

    /// A new user was submitted without an ID.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// A new user reuses an ID that is already taken.
    #[error("user {id} already exists")]
    DuplicateUser { id: UserId },

    /// A user cannot be friends with itself.
    #[error("user {id} cannot be friends with itself")]
    SelfFriendship { id: UserId },

    /// Loaded data violates a graph invariant.
    #[error("graph integrity violation: {reason}")]
    Integrity { reason: String },
}
