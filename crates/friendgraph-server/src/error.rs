//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all endpoints. It implements
//! `axum::response::IntoResponse` and answers with a plain-text body carrying
//! the error message, matching the plain-text success responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use friendgraph_core::CoreError;
use friendgraph_storage::StorageError;

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown user, unknown friend, or otherwise invalid input (400).
    #[error("{0}")]
    BadRequest(String),

    /// The user ID is already taken (409).
    #[error("{0}")]
    Conflict(String),

    /// The request body could not be decoded (500).
    #[error("{0}")]
    Decode(String),

    /// Persistence or integrity failure (500).
    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Decode(_) | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        } else {
            tracing::warn!(%status, "{}", self);
        }
        (status, self.to_string()).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::UserNotFound { .. }
            | CoreError::UnknownFriend { .. }
            | CoreError::EmptyUserId
            | CoreError::SelfFriendship { .. } => ApiError::BadRequest(err.to_string()),
            CoreError::DuplicateUser { .. } => ApiError::Conflict(err.to_string()),
            CoreError::Integrity { .. } => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friendgraph_core::UserId;

    #[test]
    fn core_errors_map_to_client_statuses() {
        let not_found: ApiError = CoreError::UserNotFound {
            id: UserId::from("9"),
        }
        .into();
        assert_eq!(not_found.status(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found.to_string(), "user 9 doesn't exist in the store");

        let unknown: ApiError = CoreError::UnknownFriend {
            id: UserId::from("7"),
        }
        .into();
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let duplicate: ApiError = CoreError::DuplicateUser {
            id: UserId::from("1"),
        }
        .into();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn decode_errors_are_server_errors() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
