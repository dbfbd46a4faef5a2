//! User request types: creation and age updates.

use std::collections::BTreeMap;

use friendgraph_core::{User, UserId};
use serde::de::IgnoredAny;
use serde::Deserialize;

/// Body of `POST /create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// The new user's unique ID.
    #[serde(default)]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Age in years.
    #[serde(default)]
    pub age: i64,
    /// Existing users the new user starts out friends with.
    #[serde(default)]
    pub friends: Option<FriendList>,
}

/// The `friends` field of a create request.
///
/// Accepts a list of IDs, or an object keyed by ID whose values are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FriendList {
    Ids(Vec<UserId>),
    Keyed(BTreeMap<UserId, IgnoredAny>),
}

impl FriendList {
    pub fn into_ids(self) -> Vec<UserId> {
        match self {
            FriendList::Ids(ids) => ids,
            FriendList::Keyed(map) => map.into_keys().collect(),
        }
    }
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        let friends = req.friends.map(FriendList::into_ids).unwrap_or_default();
        User::new(req.id, req.name, req.age).with_friends(friends)
    }
}

/// Body of `POST /update_age`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAgeRequest {
    #[serde(default)]
    pub user_id: UserId,
    pub new_age: i64,
}
