//! # Tasklane API
//!
//! Transport-agnostic facade over the dispatcher: user registration, token
//! resolution, and the chat and structured CRUD entry points. The server
//! binary maps `ApiError` codes and `Outcome` tags onto HTTP statuses; tests
//! and other frontends consume this crate directly.

mod dto;
mod error;
mod service;

pub use dto::{ChatRequest, RegisterRequest, RegisterResponse};
pub use error::{ApiError, ErrorCode};
pub use service::TasklaneService;
