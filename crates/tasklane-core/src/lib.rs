//! # Tasklane Core
//!
//! Core abstractions and deterministic logic for the tasklane service.
//!
//! This crate contains:
//! - Todo / User / Intent / Outcome definitions
//! - The deterministic command grammar
//! - The authorization policy
//! - The dispatcher that ties grammar, oracle, policy and stores together
//! - Store trait abstractions (implementations live in tasklane-stores)
//!
//! This crate does NOT care about:
//! - How requests arrive (HTTP, CLI, tests)
//! - How records are persisted
//! - Which model, if any, backs the intent oracle

pub mod dispatcher;
pub mod grammar;
pub mod oracle;
pub mod policy;
pub mod store;
pub mod types;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::dispatcher::{DispatchError, Dispatcher, ListQuery, NewTodo};
    pub use crate::grammar::parse;
    pub use crate::oracle::IntentOracle;
    pub use crate::policy::{authorize, Decision, IntentKind};
    pub use crate::store::{SortKey, StoreError, TodoFilter, TodoStore, UserStore};
    pub use crate::types::{Intent, Outcome, Status, Todo, TodoId, TodoPatch, User, UserId};
}

// Re-export key types at crate root
pub use dispatcher::{DispatchError, Dispatcher, ListQuery, NewTodo};
pub use oracle::IntentOracle;
pub use policy::{Decision, IntentKind};
pub use store::{SortKey, StoreError, TodoFilter, TodoStore, UserStore};
pub use types::{Intent, Outcome, Status, Todo, TodoId, TodoPatch, User, UserId};
