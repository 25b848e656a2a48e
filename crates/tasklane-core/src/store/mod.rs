//! Store module
//!
//! Storage abstractions consumed by the dispatcher:
//! - TodoStore: keyed todo persistence with filtered/sorted enumeration
//! - UserStore: registered identities and token lookup
//!
//! Note: Implementations are in the tasklane-stores crate

mod todo_store;
mod user_store;

pub use todo_store::{SortKey, TodoFilter, TodoStore};
pub use user_store::UserStore;

use thiserror::Error;

/// Store error types. These are internal faults, distinct from the
/// caller-facing outcome tags; the dispatcher never retries them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
