//! User handlers (create, list, delete, update age).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;

use friendgraph_core::User;

use super::decode;
use crate::error::ApiError;
use crate::schema::friends::FriendRequest;
use crate::schema::users::{CreateUserRequest, UpdateAgeRequest};
use crate::state::AppState;

/// Creates a user, optionally already friends with existing users.
///
/// `POST /create`
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, String), ApiError> {
    let req: CreateUserRequest = decode(&body)?;
    let mut service = state.service.write().await;
    let user = service.create_user(User::from(req))?;
    Ok((StatusCode::CREATED, format!("User {} was created", user.name)))
}

/// Lists every user, one summary per line.
///
/// `GET /get`
pub async fn list_users(State(state): State<AppState>) -> String {
    let service = state.service.read().await;
    let lines: Vec<String> = service.users().map(|u| u.to_string()).collect();
    tracing::debug!("listing {} user(s)", lines.len());
    lines.join("\n")
}

/// Deletes the user named by `target_id`.
///
/// `POST /delete_user`
pub async fn delete_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, ApiError> {
    let req: FriendRequest = decode(&body)?;
    let mut service = state.service.write().await;
    let removed = service.delete_user(&req.target_id)?;
    Ok(format!("User {} was deleted", removed.name))
}

/// Sets a user's age.
///
/// `POST /update_age`
pub async fn update_age(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, ApiError> {
    let req: UpdateAgeRequest = decode(&body)?;
    let mut service = state.service.write().await;
    let user = service.update_age(&req.user_id, req.new_age)?;
    Ok(format!("User {}'s age was updated to {}", user.name, user.age))
}
