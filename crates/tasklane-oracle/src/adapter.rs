//! LLM-backed IntentOracle adapter.
//!
//! Prompts the model for a `{"intent": ..., "payload": ...}` JSON object and
//! converts it into a core `Intent` by walking the value explicitly, so any
//! unexpected shape degrades to "absent" instead of an error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use tasklane_core::oracle::IntentOracle;
use tasklane_core::types::{Intent, TodoPatch};

use crate::llm::{LlmClient, LlmRequest};

const SYSTEM_PROMPT: &str = "\
You translate short todo commands into JSON. Return ONLY one JSON object of \
the form {\"intent\": \"create\"|\"list\"|\"update\"|\"delete\"|\"unknown\", \
\"payload\": {...}}. Payloads: create -> {\"title\": string, \"description\": \
string?}; list -> {}; update -> {\"id\": string, \"data\": {\"title\"?, \
\"description\"?, \"status\"?}}; delete -> {\"id\": string}. The status field \
is \"pending\" or \"completed\". Use \"unknown\" when the message is not a \
todo command.";

/// Oracle generation settings
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub model: String,
    pub temperature: f32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
        }
    }
}

/// LLM-backed intent oracle
pub struct LlmIntentOracle<C: LlmClient> {
    client: C,
    config: OracleConfig,
}

impl<C: LlmClient> LlmIntentOracle<C> {
    pub fn new(client: C, config: OracleConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl<C: LlmClient> IntentOracle for LlmIntentOracle<C> {
    async fn try_resolve(&self, text: &str) -> Option<Intent> {
        let request = LlmRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: text.to_string(),
            model: self.config.model.clone(),
            temperature: self.config.temperature,
        };

        let output = match self.client.complete(request).await {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "oracle call failed, falling back to grammar");
                return None;
            }
        };

        let intent = extract_json(&output).and_then(|json| parse_reply(&json));
        if intent.is_none() {
            debug!(output_len = output.len(), "oracle output unusable");
        }
        intent
    }
}

#[derive(Debug, Deserialize)]
struct OracleReply {
    intent: String,
    #[serde(default)]
    payload: Value,
}

/// Convert a raw oracle reply into an intent. Any missing or mistyped field
/// yields `None`; an explicit `unknown` also yields `None` so the grammar
/// still sees the input.
fn parse_reply(json: &str) -> Option<Intent> {
    let reply: OracleReply = serde_json::from_str(json).ok()?;
    let payload = &reply.payload;

    match reply.intent.as_str() {
        "create" => {
            let title = non_empty_str(payload.get("title")?)?;
            let description = payload.get("description").and_then(non_empty_str);
            Some(Intent::Create { title, description })
        }
        "list" => Some(Intent::List),
        "update" => {
            let id = non_empty_str(payload.get("id")?)?;
            let data = payload.get("data").unwrap_or(&Value::Null);
            let patch = TodoPatch {
                title: data.get("title").and_then(non_empty_str),
                description: data.get("description").and_then(non_empty_str),
                status: data
                    .get("status")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok()),
            };
            Some(Intent::Update { id, patch })
        }
        "delete" => {
            let id = non_empty_str(payload.get("id")?)?;
            Some(Intent::Delete { id })
        }
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Extract the first top-level JSON object from model output that may be
/// wrapped in prose or code fences.
fn extract_json(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(text[start..=end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use tasklane_core::types::Status;

    fn oracle(response: MockLlmClient) -> LlmIntentOracle<MockLlmClient> {
        LlmIntentOracle::new(response, OracleConfig::default())
    }

    #[tokio::test]
    async fn test_resolves_create_intent_from_json_reply() {
        let oracle = oracle(MockLlmClient::responding(
            r#"{"intent":"create","payload":{"title":"Buy milk","description":"2%"}}"#,
        ));
        assert_eq!(
            oracle.try_resolve("whatever").await,
            Some(Intent::Create {
                title: "Buy milk".to_string(),
                description: Some("2%".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_resolves_update_intent_with_partial_data() {
        let oracle = oracle(MockLlmClient::responding(
            r#"{"intent":"update","payload":{"id":"42","data":{"status":"completed"}}}"#,
        ));
        assert_eq!(
            oracle.try_resolve("whatever").await,
            Some(Intent::Update {
                id: "42".to_string(),
                patch: TodoPatch {
                    status: Some(Status::Completed),
                    ..TodoPatch::default()
                },
            })
        );
    }

    #[tokio::test]
    async fn test_tolerates_prose_around_the_json() {
        let oracle = oracle(MockLlmClient::responding(
            "Sure! Here you go:\n```json\n{\"intent\":\"delete\",\"payload\":{\"id\":\"7\"}}\n```",
        ));
        assert_eq!(
            oracle.try_resolve("whatever").await,
            Some(Intent::Delete {
                id: "7".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_client_failure_is_absent() {
        let oracle = oracle(MockLlmClient::failing("connection refused"));
        assert_eq!(oracle.try_resolve("add todo milk").await, None);
    }

    #[tokio::test]
    async fn test_malformed_replies_are_absent() {
        for response in [
            "not json at all",
            r#"{"intent":"create"}"#,
            r#"{"intent":"create","payload":{"title":""}}"#,
            r#"{"intent":"delete","payload":{}}"#,
            r#"{"payload":{"title":"x"}}"#,
        ] {
            let oracle = oracle(MockLlmClient::responding(response));
            assert_eq!(oracle.try_resolve("whatever").await, None, "{}", response);
        }
    }

    #[tokio::test]
    async fn test_unknown_intent_defers_to_grammar() {
        let oracle = oracle(MockLlmClient::responding(
            r#"{"intent":"unknown","payload":{}}"#,
        ));
        assert_eq!(oracle.try_resolve("banana").await, None);
    }

    #[test]
    fn test_extract_json_brackets() {
        assert_eq!(extract_json("{\"a\":1}"), Some("{\"a\":1}".to_string()));
        assert_eq!(extract_json("junk { \"a\": 1 } junk"), Some("{ \"a\": 1 }".to_string()));
        assert_eq!(extract_json("no braces"), None);
        assert_eq!(extract_json("} reversed {"), None);
    }
}
