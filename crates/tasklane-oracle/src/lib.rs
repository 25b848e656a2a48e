//! # Tasklane Oracle
//!
//! Best-effort LLM adapter for text-to-intent resolution. Strictly an
//! optional override attempted before the deterministic grammar: every
//! failure mode funnels into "absent", and the dispatcher falls back to the
//! grammar.

mod adapter;
mod llm;

pub use adapter::{LlmIntentOracle, OracleConfig};
pub use llm::{HttpLlmClient, HttpLlmClientConfig, LlmClient, LlmError, LlmRequest, MockLlmClient};
