//! Intent type definitions
//!
//! Intent is the structured classification of a free-text command. Every
//! input maps to exactly one variant; `Unknown` is the catch-all.

use serde::{Deserialize, Serialize};

use super::{TodoId, TodoPatch};

/// Parsed command intent plus payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    /// Create a new todo
    Create {
        title: String,
        #[serde(default)]
        description: Option<String>,
    },
    /// List todos (scoping is decided by the authorization policy)
    List,
    /// Partially update an existing todo
    Update { id: TodoId, patch: TodoPatch },
    /// Delete an existing todo
    Delete { id: TodoId },
    /// No grammar rule matched
    Unknown,
}

impl Intent {
    /// True when this intent performs no operation
    pub fn is_unknown(&self) -> bool {
        matches!(self, Intent::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serializes_with_tag_and_payload() {
        let intent = Intent::Create {
            title: "Buy milk".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&intent).expect("serialize");
        assert_eq!(json["intent"], "create");
        assert_eq!(json["payload"]["title"], "Buy milk");
    }

    #[test]
    fn test_unknown_is_flagged() {
        assert!(Intent::Unknown.is_unknown());
        assert!(!Intent::List.is_unknown());
    }
}
