//! Friend request type shared by the link, unlink, delete and friend-list
//! endpoints.

use friendgraph_core::UserId;
use serde::Deserialize;

/// Body of `/make_friends`, `/unfriend`, `/delete_user` and `/get_friends`.
///
/// `/delete_user` reads only `target_id` and `/get_friends` only `source_id`.
/// A missing field decodes as an empty ID, which never names a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendRequest {
    #[serde(default)]
    pub source_id: UserId,
    #[serde(default)]
    pub target_id: UserId,
}
