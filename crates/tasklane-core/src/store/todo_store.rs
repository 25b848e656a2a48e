//! TodoStore - todo persistence

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::types::{Status, Todo, TodoId, UserId};

/// Sort order for enumeration. Records without a due date sort last in both
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    DueDateAsc,
    DueDateDesc,
}

/// Enumeration filter; all fields optional and combined with AND
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    /// Restrict to records owned by this user
    pub owner_id: Option<UserId>,
    /// Restrict to records with this status
    pub status: Option<Status>,
    /// Sort order; unsorted enumeration is ordered by creation time
    pub sort: Option<SortKey>,
}

/// TodoStore trait - async interface for todo persistence
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Load a todo by ID
    async fn get(&self, id: &str) -> Result<Option<Todo>, StoreError>;

    /// Insert a new todo, returning the stored record
    async fn insert(&self, todo: Todo) -> Result<Todo, StoreError>;

    /// Replace an existing todo, returning the stored record
    async fn update(&self, todo: Todo) -> Result<Todo, StoreError>;

    /// Delete a todo; true when a record was removed
    async fn delete(&self, id: &TodoId) -> Result<bool, StoreError>;

    /// Enumerate todos matching the filter, in the filter's sort order
    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>, StoreError>;
}
