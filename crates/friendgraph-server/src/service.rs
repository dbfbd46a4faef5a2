//! GraphService: the single coordinator between HTTP handlers, the in-memory
//! [`UserGraph`] and its [`UserStore`].
//!
//! All graph access flows through [`GraphService`]. Handlers are thin
//! wrappers that decode a request, call one method here and format the
//! result.
//!
//! Mutations follow the configured [`SavePolicy`]. With
//! [`SavePolicy::EveryMutation`] the graph is saved before the method
//! returns, and a failed save restores the graph to its state before the
//! mutation, so callers observe all-or-nothing behaviour including
//! persistence.

use friendgraph_core::{CoreError, User, UserGraph, UserId};
use friendgraph_storage::UserStore;

use crate::config::SavePolicy;
use crate::error::ApiError;

/// Names of the two users involved in a link or unlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub source_name: String,
    pub target_name: String,
    /// Whether the call changed the graph.
    pub changed: bool,
}

/// Owns the user graph and its persistence backend.
pub struct GraphService {
    graph: UserGraph,
    store: Box<dyn UserStore>,
    policy: SavePolicy,
    /// Unsaved changes exist (only ever set under `OnShutdown`).
    dirty: bool,
}

impl GraphService {
    /// Loads the graph from `store`.
    ///
    /// A store that cannot be read, decoded or validated is an error; the
    /// server treats it as fatal.
    pub fn new(store: Box<dyn UserStore>, policy: SavePolicy) -> Result<Self, ApiError> {
        let graph = store.load()?;
        tracing::info!(
            "loaded {} user(s) from {}",
            graph.len(),
            store.location()
        );
        for user in graph.users() {
            tracing::debug!("ID: {}, Name: {}, Age: {}", user.id, user.name, user.age);
        }
        Ok(GraphService {
            graph,
            store,
            policy,
            dirty: false,
        })
    }

    pub fn graph(&self) -> &UserGraph {
        &self.graph
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // -------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------

    /// All users in insertion order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.graph.users()
    }

    /// The current records of a user's friends.
    pub fn friends(&self, id: &UserId) -> Result<Vec<&User>, ApiError> {
        Ok(self.graph.friends(id)?)
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    pub fn create_user(&mut self, user: User) -> Result<User, ApiError> {
        let created = self.mutate(|graph| Ok((graph.create_user(user)?.clone(), true)))?;
        tracing::info!(
            "created user {} ({}) with {} friend(s)",
            created.id,
            created.name,
            created.friend_count()
        );
        Ok(created)
    }

    pub fn make_friends(&mut self, source: &UserId, target: &UserId) -> Result<Friendship, ApiError> {
        let friendship = self.mutate(|graph| {
            let changed = graph.link(source, target)?;
            let friendship = Friendship {
                source_name: graph.get(source)?.name.clone(),
                target_name: graph.get(target)?.name.clone(),
                changed,
            };
            Ok((friendship, changed))
        })?;
        tracing::info!(
            "linked {} and {} (new edge: {})",
            source,
            target,
            friendship.changed
        );
        Ok(friendship)
    }

    pub fn unfriend(&mut self, source: &UserId, target: &UserId) -> Result<Friendship, ApiError> {
        let friendship = self.mutate(|graph| {
            let changed = graph.unlink(source, target)?;
            let friendship = Friendship {
                source_name: graph.get(source)?.name.clone(),
                target_name: graph.get(target)?.name.clone(),
                changed,
            };
            Ok((friendship, changed))
        })?;
        tracing::info!(
            "unlinked {} and {} (edge removed: {})",
            source,
            target,
            friendship.changed
        );
        Ok(friendship)
    }

    /// Deletes a user and every friend edge pointing at it.
    pub fn delete_user(&mut self, id: &UserId) -> Result<User, ApiError> {
        let removed = self.mutate(|graph| Ok((graph.delete(id)?, true)))?;
        tracing::info!(
            "deleted user {} ({}), detached from {} friend(s)",
            removed.id,
            removed.name,
            removed.friend_count()
        );
        Ok(removed)
    }

    pub fn update_age(&mut self, id: &UserId, age: i64) -> Result<User, ApiError> {
        let updated = self.mutate(|graph| {
            let changed = graph.get(id)?.age != age;
            Ok((graph.update_age(id, age)?.clone(), changed))
        })?;
        tracing::info!("updated age of user {} to {}", id, age);
        Ok(updated)
    }

    /// Saves the graph if it has unsaved changes.
    ///
    /// Returns `true` when a save happened.
    pub fn flush(&mut self) -> Result<bool, ApiError> {
        if !self.dirty {
            return Ok(false);
        }
        self.store.save(&self.graph)?;
        self.dirty = false;
        Ok(true)
    }

    /// Applies `op` to the graph and persists it per the save policy.
    ///
    /// `op` returns its result plus whether it changed the graph; unchanged
    /// graphs are not saved. A failed `op` leaves the graph untouched (every
    /// `UserGraph` mutation validates before changing anything). A failed
    /// save restores the snapshot taken before `op` ran.
    fn mutate<T, F>(&mut self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut UserGraph) -> Result<(T, bool), CoreError>,
    {
        match self.policy {
            SavePolicy::EveryMutation => {
                let snapshot = self.graph.clone();
                let (out, changed) = op(&mut self.graph)?;
                if !changed {
                    return Ok(out);
                }
                if let Err(e) = self.store.save(&self.graph) {
                    tracing::error!(
                        "save to {} failed, rolling back: {}",
                        self.store.location(),
                        e
                    );
                    self.graph = snapshot;
                    return Err(e.into());
                }
                Ok(out)
            }
            SavePolicy::OnShutdown => {
                let (out, changed) = op(&mut self.graph)?;
                self.dirty |= changed;
                Ok(out)
            }
        }
    }
}
