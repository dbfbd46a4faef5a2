//! UserGraph: the in-memory table of users and their friendship edges.
//!
//! [`UserGraph`] owns every [`User`] record. Friend edges are stored as
//! [`UserId`] keys inside each record and resolved through the table on read,
//! so there is exactly one copy of each user and no ownership cycles.
//!
//! # Invariants
//!
//! Every public mutation preserves the following, and checks its inputs
//! before touching any record so a rejected call changes nothing:
//! - **Symmetry**: if A lists B as a friend, B lists A.
//! - **No dangling edges**: every friend ID names a stored user.
//! - **No self edges**: a user never lists itself.
//! - **Key consistency**: the table key equals the record's `id`.
//!
//! [`UserGraph::check_integrity`] verifies all four and is used when a graph
//! is rebuilt from persisted data.

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::id::UserId;
use crate::user::User;

/// The user table. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserGraph {
    users: IndexMap<UserId, User>,
}

impl UserGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        UserGraph {
            users: IndexMap::new(),
        }
    }

    /// Rebuilds a graph from previously stored records.
    ///
    /// Records are taken as-is (no reciprocal edges are added), then the whole
    /// graph is validated with [`check_integrity`](Self::check_integrity).
    pub fn from_users<I>(users: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = User>,
    {
        let mut table = IndexMap::new();
        for user in users {
            if user.id.is_blank() {
                return Err(CoreError::Integrity {
                    reason: "stored user has an empty id".to_string(),
                });
            }
            if let Some(previous) = table.insert(user.id.clone(), user) {
                return Err(CoreError::Integrity {
                    reason: format!("user {} is stored more than once", previous.id),
                });
            }
        }
        let graph = UserGraph { users: table };
        graph.check_integrity()?;
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.users.contains_key(id)
    }

    /// Looks up one user.
    pub fn get(&self, id: &UserId) -> Result<&User, CoreError> {
        self.users
            .get(id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })
    }

    /// All users in insertion order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Inserts a new user.
    ///
    /// Every ID in `user.friends` must already be stored. Each listed friend
    /// gets the reciprocal edge so the new user is immediately symmetric.
    pub fn create_user(&mut self, user: User) -> Result<&User, CoreError> {
        if user.id.is_blank() {
            return Err(CoreError::EmptyUserId);
        }
        if self.users.contains_key(&user.id) {
            return Err(CoreError::DuplicateUser {
                id: user.id.clone(),
            });
        }
        if user.friends.contains(&user.id) {
            return Err(CoreError::SelfFriendship {
                id: user.id.clone(),
            });
        }
        if let Some(missing) = user.friends.iter().find(|f| !self.users.contains_key(*f)) {
            return Err(CoreError::UnknownFriend {
                id: missing.clone(),
            });
        }

        for friend_id in &user.friends {
            if let Some(friend) = self.users.get_mut(friend_id) {
                friend.friends.insert(user.id.clone());
            }
        }
        let id = user.id.clone();
        let index = self.users.insert_full(id, user).0;
        Ok(&self.users[index])
    }

    /// Makes two users mutual friends.
    ///
    /// Returns `false` when they already were, in which case nothing changes.
    pub fn link(&mut self, source: &UserId, target: &UserId) -> Result<bool, CoreError> {
        self.require(source)?;
        self.require(target)?;
        if source == target {
            return Err(CoreError::SelfFriendship { id: source.clone() });
        }

        let mut created = false;
        if let Some(user) = self.users.get_mut(source) {
            created |= user.friends.insert(target.clone());
        }
        if let Some(user) = self.users.get_mut(target) {
            created |= user.friends.insert(source.clone());
        }
        Ok(created)
    }

    /// Removes the friendship between two users in both directions.
    ///
    /// Returns `false` when they were not friends.
    pub fn unlink(&mut self, source: &UserId, target: &UserId) -> Result<bool, CoreError> {
        self.require(source)?;
        self.require(target)?;
        if source == target {
            return Err(CoreError::SelfFriendship { id: source.clone() });
        }

        let mut removed = false;
        if let Some(user) = self.users.get_mut(source) {
            removed |= user.friends.remove(target);
        }
        if let Some(user) = self.users.get_mut(target) {
            removed |= user.friends.remove(source);
        }
        Ok(removed)
    }

    /// Deletes a user and every edge pointing at it.
    ///
    /// Returns the removed record.
    pub fn delete(&mut self, id: &UserId) -> Result<User, CoreError> {
        let removed = self
            .users
            .shift_remove(id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })?;

        for friend_id in &removed.friends {
            if let Some(friend) = self.users.get_mut(friend_id) {
                friend.friends.remove(id);
            }
        }
        Ok(removed)
    }

    /// Resolves a user's friends to their current records, ordered by ID.
    pub fn friends(&self, id: &UserId) -> Result<Vec<&User>, CoreError> {
        let user = self.get(id)?;
        user.friends
            .iter()
            .map(|friend_id| {
                self.users.get(friend_id).ok_or_else(|| CoreError::Integrity {
                    reason: format!("user {} lists missing friend {}", id, friend_id),
                })
            })
            .collect()
    }

    /// Sets a user's age in place.
    pub fn update_age(&mut self, id: &UserId, age: i64) -> Result<&User, CoreError> {
        let user = self
            .users
            .get_mut(id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })?;
        user.age = age;
        Ok(&*user)
    }

    /// Verifies every graph invariant.
    pub fn check_integrity(&self) -> Result<(), CoreError> {
        for (key, user) in &self.users {
            if *key != user.id {
                return Err(CoreError::Integrity {
                    reason: format!("user stored under key {} has id {}", key, user.id),
                });
            }
            for friend_id in &user.friends {
                if friend_id == key {
                    return Err(CoreError::Integrity {
                        reason: format!("user {} lists itself as a friend", key),
                    });
                }
                let friend = self.users.get(friend_id).ok_or_else(|| CoreError::Integrity {
                    reason: format!("user {} lists missing friend {}", key, friend_id),
                })?;
                if !friend.friends.contains(key) {
                    return Err(CoreError::Integrity {
                        reason: format!(
                            "user {} lists {} as a friend but not the other way round",
                            key, friend_id
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn require(&self, id: &UserId) -> Result<(), CoreError> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(CoreError::UserNotFound { id: id.clone() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> UserId {
        UserId::from(s)
    }

    fn alice_and_bob() -> UserGraph {
        let mut graph = UserGraph::new();
        graph.create_user(User::new("1", "Alice", 30)).unwrap();
        graph.create_user(User::new("2", "Bob", 25)).unwrap();
        graph
    }

    fn friend_names(graph: &UserGraph, user: &str) -> Vec<String> {
        graph
            .friends(&id(user))
            .unwrap()
            .into_iter()
            .map(|u| u.name.clone())
            .collect()
    }

    #[test]
    fn link_is_symmetric() {
        let mut graph = alice_and_bob();
        assert!(graph.link(&id("1"), &id("2")).unwrap());

        assert_eq!(friend_names(&graph, "1"), vec!["Bob"]);
        assert_eq!(friend_names(&graph, "2"), vec!["Alice"]);
        graph.check_integrity().unwrap();
    }

    #[test]
    fn link_is_idempotent() {
        let mut graph = alice_and_bob();
        graph.link(&id("1"), &id("2")).unwrap();
        let once = graph.clone();

        assert!(!graph.link(&id("1"), &id("2")).unwrap());
        assert!(!graph.link(&id("2"), &id("1")).unwrap());
        assert_eq!(graph, once);
    }

    #[test]
    fn link_missing_user_changes_nothing() {
        let mut graph = alice_and_bob();
        let before = graph.clone();

        let err = graph.link(&id("1"), &id("9")).unwrap_err();
        assert_eq!(err, CoreError::UserNotFound { id: id("9") });
        let err = graph.link(&id("9"), &id("1")).unwrap_err();
        assert_eq!(err, CoreError::UserNotFound { id: id("9") });
        assert_eq!(graph, before);
    }

    #[test]
    fn self_link_is_rejected() {
        let mut graph = alice_and_bob();
        let err = graph.link(&id("1"), &id("1")).unwrap_err();
        assert_eq!(err, CoreError::SelfFriendship { id: id("1") });
        assert!(graph.friends(&id("1")).unwrap().is_empty());
    }

    #[test]
    fn create_with_unknown_friend_is_rejected_without_change() {
        let mut graph = alice_and_bob();
        let before = graph.clone();

        let err = graph
            .create_user(User::new("3", "Carol", 40).with_friends(["1", "7"]))
            .unwrap_err();
        assert_eq!(err, CoreError::UnknownFriend { id: id("7") });
        assert_eq!(graph, before);
        assert!(!graph.contains(&id("3")));
    }

    #[test]
    fn create_with_friends_adds_reciprocal_edges() {
        let mut graph = alice_and_bob();
        graph
            .create_user(User::new("3", "Carol", 40).with_friends(["1", "2"]))
            .unwrap();

        assert_eq!(friend_names(&graph, "3"), vec!["Alice", "Bob"]);
        assert_eq!(friend_names(&graph, "1"), vec!["Carol"]);
        assert_eq!(friend_names(&graph, "2"), vec!["Carol"]);
        graph.check_integrity().unwrap();
    }

    #[test]
    fn create_rejects_empty_duplicate_and_self_listed_ids() {
        let mut graph = alice_and_bob();

        assert_eq!(
            graph.create_user(User::new("", "Nobody", 1)).unwrap_err(),
            CoreError::EmptyUserId
        );
        assert_eq!(
            graph.create_user(User::new("1", "Alice II", 31)).unwrap_err(),
            CoreError::DuplicateUser { id: id("1") }
        );
        assert_eq!(
            graph
                .create_user(User::new("4", "Dan", 20).with_friends(["4"]))
                .unwrap_err(),
            CoreError::SelfFriendship { id: id("4") }
        );
        assert_eq!(graph.get(&id("1")).unwrap().name, "Alice");
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn delete_cleans_up_back_references() {
        let mut graph = alice_and_bob();
        graph.create_user(User::new("3", "Carol", 40)).unwrap();
        graph.link(&id("1"), &id("2")).unwrap();
        graph.link(&id("3"), &id("2")).unwrap();

        let removed = graph.delete(&id("2")).unwrap();
        assert_eq!(removed.name, "Bob");

        assert!(graph.friends(&id("1")).unwrap().is_empty());
        assert!(graph.friends(&id("3")).unwrap().is_empty());
        assert_eq!(
            graph.friends(&id("2")).unwrap_err(),
            CoreError::UserNotFound { id: id("2") }
        );
        assert_eq!(
            graph.get(&id("2")).unwrap_err(),
            CoreError::UserNotFound { id: id("2") }
        );
        graph.check_integrity().unwrap();
    }

    #[test]
    fn delete_missing_user_fails() {
        let mut graph = alice_and_bob();
        assert_eq!(
            graph.delete(&id("9")).unwrap_err(),
            CoreError::UserNotFound { id: id("9") }
        );
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn age_update_is_visible_through_friends() {
        let mut graph = alice_and_bob();
        graph.link(&id("1"), &id("2")).unwrap();

        graph.update_age(&id("2"), 26).unwrap();

        let friends = graph.friends(&id("1")).unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].name, "Bob");
        assert_eq!(friends[0].age, 26);
    }

    #[test]
    fn update_age_missing_user_fails() {
        let mut graph = alice_and_bob();
        assert_eq!(
            graph.update_age(&id("9"), 1).unwrap_err(),
            CoreError::UserNotFound { id: id("9") }
        );
    }

    #[test]
    fn unlink_removes_both_directions() {
        let mut graph = alice_and_bob();
        graph.link(&id("1"), &id("2")).unwrap();

        assert!(graph.unlink(&id("2"), &id("1")).unwrap());
        assert!(graph.friends(&id("1")).unwrap().is_empty());
        assert!(graph.friends(&id("2")).unwrap().is_empty());
        assert!(!graph.unlink(&id("1"), &id("2")).unwrap());
    }

    #[test]
    fn self_unlink_is_rejected() {
        let mut graph = alice_and_bob();
        let err = graph.unlink(&id("1"), &id("1")).unwrap_err();
        assert_eq!(err, CoreError::SelfFriendship { id: id("1") });
    }

    #[test]
    fn alice_bob_scenario() {
        let mut graph = alice_and_bob();
        graph.link(&id("1"), &id("2")).unwrap();
        assert_eq!(friend_names(&graph, "1"), vec!["Bob"]);

        graph.update_age(&id("2"), 26).unwrap();
        let friends = graph.friends(&id("1")).unwrap();
        assert_eq!((friends[0].name.as_str(), friends[0].age), ("Bob", 26));

        graph.delete(&id("2")).unwrap();
        assert!(friend_names(&graph, "1").is_empty());
    }

    #[test]
    fn users_keep_insertion_order_after_delete() {
        let mut graph = alice_and_bob();
        graph.create_user(User::new("0", "Zed", 50)).unwrap();
        graph.delete(&id("1")).unwrap();

        let ids: Vec<&str> = graph.users().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "0"]);
    }

    #[test]
    fn from_users_accepts_consistent_records() {
        let graph = UserGraph::from_users(vec![
            User::new("1", "Alice", 30).with_friends(["2"]),
            User::new("2", "Bob", 25).with_friends(["1"]),
        ])
        .unwrap();
        assert_eq!(friend_names(&graph, "1"), vec!["Bob"]);
    }

    #[test]
    fn from_users_rejects_asymmetric_records() {
        let err = UserGraph::from_users(vec![
            User::new("1", "Alice", 30).with_friends(["2"]),
            User::new("2", "Bob", 25),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::Integrity { .. }));
    }

    #[test]
    fn from_users_rejects_dangling_and_duplicate_records() {
        let dangling =
            UserGraph::from_users(vec![User::new("1", "Alice", 30).with_friends(["5"])]);
        assert!(matches!(dangling, Err(CoreError::Integrity { .. })));

        let duplicate = UserGraph::from_users(vec![
            User::new("1", "Alice", 30),
            User::new("1", "Alice", 31),
        ]);
        assert!(matches!(duplicate, Err(CoreError::Integrity { .. })));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create(u8, Vec<u8>),
        Link(u8, u8),
        Unlink(u8, u8),
        Delete(u8),
        Age(u8, i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        let key = 0u8..6;
        prop_oneof![
            (key.clone(), prop::collection::vec(0u8..6, 0..3)).prop_map(|(k, f)| Op::Create(k, f)),
            (key.clone(), key.clone()).prop_map(|(a, b)| Op::Link(a, b)),
            (key.clone(), key.clone()).prop_map(|(a, b)| Op::Unlink(a, b)),
            key.clone().prop_map(Op::Delete),
            (key, 0i64..120).prop_map(|(k, age)| Op::Age(k, age)),
        ]
    }

    fn apply(graph: &mut UserGraph, op: &Op) -> Result<(), CoreError> {
        let key = |k: &u8| UserId(k.to_string());
        match op {
            Op::Create(k, friends) => graph
                .create_user(
                    User::new(key(k), format!("user{k}"), 20).with_friends(friends.iter().map(key)),
                )
                .map(|_| ()),
            Op::Link(a, b) => graph.link(&key(a), &key(b)).map(|_| ()),
            Op::Unlink(a, b) => graph.unlink(&key(a), &key(b)).map(|_| ()),
            Op::Delete(k) => graph.delete(&key(k)).map(|_| ()),
            Op::Age(k, age) => graph.update_age(&key(k), *age).map(|_| ()),
        }
    }

    proptest! {
        #[test]
        fn invariants_hold_after_any_operation_sequence(ops in prop::collection::vec(op(), 0..40)) {
            let mut graph = UserGraph::new();
            for op in &ops {
                let before = graph.clone();
                if apply(&mut graph, op).is_err() {
                    prop_assert_eq!(&graph, &before);
                }
                prop_assert!(graph.check_integrity().is_ok());
            }
        }
    }
}
