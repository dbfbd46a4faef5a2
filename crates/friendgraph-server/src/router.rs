//! Router assembly for the friendgraph HTTP API.
//!
//! [`build_router`] wires each handler to its exact path. Every route accepts
//! a single method; any other method is answered by
//! [`handlers::wrong_method`] with an empty `400 Bad Request`. `get(..)`
//! routes would also answer `HEAD`, so those get an explicit `HEAD` route to
//! the same handler.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Users
        .route(
            "/create",
            post(handlers::users::create_user).fallback(handlers::wrong_method),
        )
        .route(
            "/get",
            get(handlers::users::list_users)
                .head(handlers::wrong_method)
                .fallback(handlers::wrong_method),
        )
        .route(
            "/delete_user",
            post(handlers::users::delete_user).fallback(handlers::wrong_method),
        )
        .route(
            "/update_age",
            post(handlers::users::update_age).fallback(handlers::wrong_method),
        )
        // Friendships
        .route(
            "/make_friends",
            post(handlers::friends::make_friends).fallback(handlers::wrong_method),
        )
        .route(
            "/unfriend",
            post(handlers::friends::unfriend).fallback(handlers::wrong_method),
        )
        .route(
            "/get_friends",
            post(handlers::friends::get_friends).fallback(handlers::wrong_method),
        )
        // Liveness
        .route(
            "/health",
            get(handlers::health)
                .head(handlers::wrong_method)
                .fallback(handlers::wrong_method),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
