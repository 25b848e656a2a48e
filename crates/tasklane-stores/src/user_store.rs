//! In-memory UserStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use tasklane_core::store::{StoreError, UserStore};
use tasklane_core::types::{User, UserId};

/// In-memory implementation for development and testing
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already registered",
                user.username
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(users.values().find(|u| u.token == token).cloned())
    }

    async fn any_registered(&self) -> Result<bool, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(!users.is_empty())
    }
}
