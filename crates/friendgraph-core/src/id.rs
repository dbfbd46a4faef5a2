//! Stable user identity.
//!
//! [`UserId`] is the only key the graph uses, both for storage and for every
//! friend edge. Names are display data and are never used for lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique user identifier. Wraps the `id` string clients supply.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_display() {
        assert_eq!(format!("{}", UserId::from("42")), "42");
    }

    #[test]
    fn blank_ids() {
        assert!(UserId::from("").is_blank());
        assert!(UserId::from("  ").is_blank());
        assert!(!UserId::from("a").is_blank());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&UserId::from("7")).unwrap();
        assert_eq!(json, "\"7\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserId::from("7"));
    }
}
