//! Result envelope
//!
//! Outcome is the uniform, transport-agnostic result of every dispatch. The
//! text interface and the structured interface both return it; callers map
//! the tag onto their own status vocabulary.

use serde::{Deserialize, Serialize};

use super::{Todo, TodoId};

/// Tagged dispatch outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// A new todo was inserted
    Created { todo: Todo },
    /// Enumeration result, scoped per policy
    List { todos: Vec<Todo> },
    /// An existing todo was partially updated
    Updated { todo: Todo },
    /// The todo was removed
    Deleted { id: TodoId },
    /// The target id resolved to no record; nothing was mutated
    NotFound { id: TodoId },
    /// Credential supplied but does not match the record's owner
    Forbidden,
    /// No credential supplied where one is required
    Unauthorized,
    /// The text matched no grammar rule; no-op
    UnknownCommand,
}
