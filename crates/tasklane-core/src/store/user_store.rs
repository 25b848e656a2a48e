//! UserStore - registered identities

use async_trait::async_trait;

use super::StoreError;
use crate::types::User;

/// UserStore trait - async interface for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Duplicate usernames yield `StoreError::Conflict`.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Resolve a bearer token to its user. Unknown or malformed tokens
    /// resolve to `None`, never an error.
    async fn get_by_token(&self, token: &str) -> Result<Option<User>, StoreError>;

    /// True once any user has ever registered. Gates bootstrap mode.
    async fn any_registered(&self) -> Result<bool, StoreError>;
}
