//! Intent oracle abstraction
//!
//! An optional, best-effort text-to-intent override consulted before the
//! deterministic grammar. Failure is modeled as an absent result, never an
//! error: any adapter that cannot positively resolve an intent returns
//! `None` and the dispatcher falls back to the grammar.

use async_trait::async_trait;

use crate::types::Intent;

/// Best-effort text-to-intent resolver
#[async_trait]
pub trait IntentOracle: Send + Sync {
    /// Attempt to resolve `text` to an intent. `None` on any failure
    /// (transport error, timeout, malformed response) and also when the
    /// backend itself reports `unknown`.
    async fn try_resolve(&self, text: &str) -> Option<Intent>;
}

#[async_trait]
impl IntentOracle for std::sync::Arc<dyn IntentOracle> {
    async fn try_resolve(&self, text: &str) -> Option<Intent> {
        (**self).try_resolve(text).await
    }
}
