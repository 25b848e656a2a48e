//! # Tasklane Stores
//!
//! Reference implementations of the tasklane-core store traits. In-memory,
//! suitable for development and tests; the dispatcher only ever sees the
//! traits, so persistent backends can be swapped in behind them.

mod todo_store;
mod user_store;

pub use todo_store::InMemoryTodoStore;
pub use user_store::InMemoryUserStore;
