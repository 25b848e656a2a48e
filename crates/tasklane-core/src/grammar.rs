//! Command grammar
//!
//! Deterministic text-to-intent parser and the fallback for the oracle path.
//! `parse` is total: every input maps to some intent, with `Unknown` as the
//! catch-all. Keyword matching is case-insensitive and first-match-wins;
//! payload text keeps the caller's original casing.
//!
//! Two notations per mutating command:
//! - delimited: `<verb> todo: <title> [| <description> [| <status>]]`
//! - positional: `add todo Buy milk` / `update todo <id> <field> <value...>`

use crate::types::{Intent, TodoPatch};

/// Parse a free-text command into an intent. Never fails; inputs matching no
/// rule yield `Intent::Unknown`.
pub fn parse(text: &str) -> Intent {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    if lower.starts_with("create todo") || lower.starts_with("add todo") {
        return parse_create(trimmed);
    }
    if lower.starts_with("list todo") || lower.starts_with("show todo") {
        return Intent::List;
    }
    if lower.starts_with("delete todo") || lower.starts_with("remove todo") {
        return parse_delete(trimmed);
    }
    if lower.starts_with("update todo") {
        return parse_update(trimmed);
    }

    Intent::Unknown
}

fn parse_create(text: &str) -> Intent {
    // Delimited form: 'create todo: Title | description'
    if let Some((_, fields)) = text.split_once(':') {
        let (title, description) = match fields.split_once('|') {
            Some((title, desc)) => (title.trim(), non_empty(desc)),
            None => (fields.trim(), None),
        };
        if title.is_empty() {
            return Intent::Unknown;
        }
        return Intent::Create {
            title: title.to_string(),
            description,
        };
    }

    // Positional form: 'add todo Buy milk'
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() >= 3 {
        return Intent::Create {
            title: tokens[2..].join(" "),
            description: None,
        };
    }

    Intent::Unknown
}

fn parse_delete(text: &str) -> Intent {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    // A trailing id token is required.
    match tokens.get(2) {
        Some(id) => Intent::Delete { id: id.to_string() },
        None => Intent::Unknown,
    }
}

fn parse_update(text: &str) -> Intent {
    // Delimited form: 'update todo <id>: Title | description | status'
    if let Some((left, fields)) = text.split_once(':') {
        let left_tokens: Vec<&str> = left.split_whitespace().collect();
        let Some(id) = left_tokens.get(2) else {
            return Intent::Unknown;
        };

        let mut parts = fields.splitn(3, '|');
        let patch = TodoPatch {
            title: parts.next().and_then(non_empty),
            description: parts.next().and_then(non_empty),
            // A status token that does not parse is skipped, keeping the
            // grammar total.
            status: parts.next().and_then(|s| s.trim().parse().ok()),
        };
        return Intent::Update {
            id: id.to_string(),
            patch,
        };
    }

    // Positional form: 'update todo <id> <field> <value...>'
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() >= 5 {
        let id = tokens[2].to_string();
        let field = tokens[3].to_lowercase();
        let value = tokens[4..].join(" ");
        let patch = match field.as_str() {
            "title" => TodoPatch {
                title: Some(value),
                ..TodoPatch::default()
            },
            "description" => TodoPatch {
                description: Some(value),
                ..TodoPatch::default()
            },
            "status" => match value.parse() {
                Ok(status) => TodoPatch {
                    status: Some(status),
                    ..TodoPatch::default()
                },
                // This form names exactly one field; a bad value means the
                // command as a whole is malformed.
                Err(()) => return Intent::Unknown,
            },
            _ => return Intent::Unknown,
        };
        return Intent::Update { id, patch };
    }

    Intent::Unknown
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
