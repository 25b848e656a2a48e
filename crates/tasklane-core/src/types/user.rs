//! User type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type alias for User ID
pub type UserId = String;

/// User - a registered identity with an opaque bearer token.
///
/// Immutable after registration; the token permanently identifies exactly one
/// user. The token is a credential and must never appear in todo projections,
/// so `Serialize` skips it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user
    pub id: UserId,
    /// Unique username chosen at registration
    pub username: String,
    /// Opaque bearer credential; returned once at registration, never after
    #[serde(skip_serializing)]
    pub token: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Register a new user with a freshly issued token.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            token: uuid::Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_issues_distinct_tokens() {
        let a = User::new("alice");
        let b = User::new("bob");
        assert!(!a.token.is_empty());
        assert_ne!(a.token, b.token);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_user_serialization_never_leaks_token() {
        let user = User::new("alice");
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("token").is_none());
        assert_eq!(json["username"], "alice");
    }
}
