//! Best-effort reply extraction from remote generation responses.
//!
//! The remote service's response contract is unstable, so extraction is a
//! priority-ordered list of shape rules rather than a fixed deserialization
//! target. Supported shapes:
//!
//! - `{"reply": "..."}`, `{"output": "..."}`, `{"text": "..."}`
//! - `{"choices": [{"text": "..."}, ...]}` (OpenAI-like)
//! - `{"result": {"content": "..."}}`
//!
//! Extraction is total: an unrecognized shape degrades to a stringified
//! form of the payload, never an error.

use serde_json::{Map, Value};

type Rule = fn(&Map<String, Value>) -> Option<String>;

/// Shape rules in priority order. First match wins. Extending the
/// supported shapes means appending a rule here.
const RULES: &[Rule] = &[top_level_key, first_choice, result_content];

/// Extract a plain-text reply from an arbitrary decoded response body.
pub fn reply_text(response: &Value) -> String {
    let Value::Object(map) = response else {
        return stringify(response);
    };

    for rule in RULES {
        if let Some(text) = rule(map) {
            return text;
        }
    }

    stringify(response)
}

/// `reply` / `output` / `text` at the top level, in that order.
fn top_level_key(map: &Map<String, Value>) -> Option<String> {
    for key in ["reply", "output", "text"] {
        if let Some(Value::String(s)) = map.get(key) {
            return Some(s.clone());
        }
    }
    None
}

/// First element of a non-empty `choices` array, looking for a string
/// under `text` / `message` / `content`.
fn first_choice(map: &Map<String, Value>) -> Option<String> {
    let Some(Value::Array(choices)) = map.get("choices") else {
        return None;
    };
    let Some(Value::Object(first)) = choices.first() else {
        return None;
    };
    for key in ["text", "message", "content"] {
        if let Some(Value::String(s)) = first.get(key) {
            return Some(s.clone());
        }
    }
    None
}

/// Nested `result.content` string.
fn result_content(map: &Map<String, Value>) -> Option<String> {
    match map.get("result") {
        Some(Value::Object(result)) => match result.get("content") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Stable last-resort stringification. Bare strings come through without
/// JSON quoting; everything else uses compact JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
