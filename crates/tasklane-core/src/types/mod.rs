//! Type definitions
//!
//! The domain vocabulary of the system: todos, users, parsed intents and the
//! uniform result envelope.

mod intent;
mod outcome;
mod todo;
mod user;

pub use intent::Intent;
pub use outcome::Outcome;
pub use todo::{Status, Todo, TodoId, TodoPatch};
pub use user::{User, UserId};
