//! The user record owned by the graph.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A stored user.
///
/// `friends` holds keys into the owning [`UserGraph`](crate::graph::UserGraph),
/// not copies of the friends' records. Resolving a friend always goes through
/// the graph, so age and name changes are visible to every friend at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: i64,
    #[serde(default)]
    pub friends: BTreeSet<UserId>,
}

impl User {
    /// Creates a user with no friends.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, age: i64) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            age,
            friends: BTreeSet::new(),
        }
    }

    /// Builder-style helper listing the IDs this user starts out friends with.
    pub fn with_friends<I, T>(mut self, friends: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<UserId>,
    {
        self.friends = friends.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_friend_of(&self, other: &UserId) -> bool {
        self.friends.contains(other)
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }
}

/// One-line summary used by the listing endpoint and the CLI.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id is {}, name is {}, age is {} and has {} friend(s)",
            self.id,
            self.name,
            self.age,
            self.friends.len()
        )
    }
}
