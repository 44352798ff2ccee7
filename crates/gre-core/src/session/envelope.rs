//! Active-session response envelopes.
//!
//! The endpoint has answered in five different shapes over time. Detection
//! runs in a fixed priority order and never fails: an unknown shape is
//! [`SessionEnvelope::Unrecognized`] and decodes to an empty list.

use serde_json::Value;

use super::model::ActiveSession;
use crate::decode::decode_items;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnvelope {
    /// `{success: true, data: {activeSessions: [...]}}`
    Wrapped(Vec<Value>),
    /// `[...]`
    Bare(Vec<Value>),
    /// `{data: [...]}`
    Data(Vec<Value>),
    /// `{sessions: [...]}`
    Sessions(Vec<Value>),
    /// `{active_sessions: [...]}`
    SnakeCase(Vec<Value>),
    Unrecognized,
}

fn array_at(value: &Value, key: &str) -> Option<Vec<Value>> {
    value.get(key).and_then(Value::as_array).cloned()
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) | None => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

impl SessionEnvelope {
    pub fn detect(body: &Value) -> Self {
        if is_truthy(body.get("success")) {
            if let Some(items) = body.get("data").and_then(|d| array_at(d, "activeSessions")) {
                return Self::Wrapped(items);
            }
        }
        if let Some(items) = body.as_array() {
            return Self::Bare(items.clone());
        }
        if let Some(items) = array_at(body, "data") {
            return Self::Data(items);
        }
        if let Some(items) = array_at(body, "sessions") {
            return Self::Sessions(items);
        }
        if let Some(items) = array_at(body, "active_sessions") {
            return Self::SnakeCase(items);
        }
        Self::Unrecognized
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Wrapped(items)
            | Self::Bare(items)
            | Self::Data(items)
            | Self::Sessions(items)
            | Self::SnakeCase(items) => items,
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// Decodes any known envelope into sessions; unknown shapes yield an empty list.
pub fn normalize_sessions(body: Value) -> Vec<ActiveSession> {
    let envelope = SessionEnvelope::detect(&body);
    if envelope == SessionEnvelope::Unrecognized {
        tracing::warn!("Unexpected active-session response shape, treating as empty");
    }
    decode_items(envelope.into_items(), "active_session")
}
