//! Friendship handlers (link, unlink, list friends).

use axum::body::Bytes;
use axum::extract::State;

use super::decode;
use crate::error::ApiError;
use crate::schema::friends::FriendRequest;
use crate::state::AppState;

/// Makes `source_id` and `target_id` mutual friends. Idempotent.
///
/// `POST /make_friends`
pub async fn make_friends(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, ApiError> {
    let req: FriendRequest = decode(&body)?;
    let mut service = state.service.write().await;
    let friendship = service.make_friends(&req.source_id, &req.target_id)?;
    Ok(format!(
        "{} and {} are now friends",
        friendship.source_name, friendship.target_name
    ))
}

/// Removes the friendship between `source_id` and `target_id`.
///
/// `POST /unfriend`
pub async fn unfriend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, ApiError> {
    let req: FriendRequest = decode(&body)?;
    let mut service = state.service.write().await;
    let friendship = service.unfriend(&req.source_id, &req.target_id)?;
    Ok(format!(
        "{} and {} are no longer friends",
        friendship.source_name, friendship.target_name
    ))
}

/// Lists the names of `source_id`'s friends, one per line.
///
/// `POST /get_friends`
pub async fn get_friends(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, ApiError> {
    let req: FriendRequest = decode(&body)?;
    let service = state.service.read().await;
    let names: Vec<&str> = service
        .friends(&req.source_id)?
        .into_iter()
        .map(|u| u.name.as_str())
        .collect();
    Ok(names.join("\n"))
}
