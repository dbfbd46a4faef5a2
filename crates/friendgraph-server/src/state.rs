//! Application state with a shared `GraphService` for concurrent access.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::RwLock<>>`. Listing
//! users and friends takes the read lock and may run concurrently; every
//! mutation takes the write lock, and with it any save the mutation triggers,
//! so a save never observes a half-applied change.

use std::sync::Arc;

use tokio::sync::RwLock;

use friendgraph_storage::{InMemoryStore, JsonFileStore, UserStore};

use crate::config::{SavePolicy, ServerConfig};
use crate::error::ApiError;
use crate::service::GraphService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The shared graph service (async RwLock, awaited without blocking the
    /// runtime).
    pub service: Arc<RwLock<GraphService>>,
}

impl AppState {
    /// Creates an `AppState` backed by the JSON document at
    /// `config.data_path`. The document must exist and load cleanly.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let store = JsonFileStore::new(&config.data_path);
        Self::with_store(Box::new(store), config.save_policy)
    }

    /// Creates an `AppState` over an arbitrary store.
    pub fn with_store(store: Box<dyn UserStore>, policy: SavePolicy) -> Result<Self, ApiError> {
        let service = GraphService::new(store, policy)?;
        Ok(AppState {
            service: Arc::new(RwLock::new(service)),
        })
    }

    /// Creates an `AppState` with an empty in-memory store (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        Self::with_store(Box::new(InMemoryStore::new()), SavePolicy::EveryMutation)
    }

    /// Saves any unsaved changes; called on graceful shutdown.
    pub async fn flush(&self) -> Result<bool, ApiError> {
        self.service.write().await.flush()
    }
}
