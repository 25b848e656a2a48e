//! Todo type definitions
//!
//! Todo is the single tracked resource. Ownership is set once at creation and
//! never transferred.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UserId;

/// Type alias for Todo ID
pub type TodoId = String;

/// Completion status of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            _ => Err(()),
        }
    }
}

/// Todo - the tracked record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier for this todo
    pub id: TodoId,
    /// Short title; never empty after trimming
    pub title: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Completion status
    #[serde(default)]
    pub status: Status,
    /// Priority, higher is more urgent
    #[serde(default)]
    pub priority: i32,
    /// Optional due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user, if the record was created with an identity
    #[serde(default)]
    pub owner_id: Option<UserId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; always >= created_at
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new pending todo. The caller is responsible for rejecting
    /// empty titles before construction.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            status: Status::Pending,
            priority: 0,
            due_date: None,
            owner_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, refreshing `updated_at`. Fields absent from
    /// the patch are left untouched.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial field set for updates; only present fields are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

impl TodoPatch {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
