//! Lenient decoding helpers for loosely typed API payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes every element on its own; elements that fail are skipped with a warning.
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>, entity: &'static str) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(entity, index, error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::debug!(entity, total, kept = decoded.len(), "Decoded list with skips");
    }
    decoded
}

/// Unwraps a bare array or a `{data: [...]}` envelope; anything else is empty.
pub fn array_or_data(body: Value, entity: &'static str) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!(entity, "Unrecognized list envelope, treating as empty");
                Vec::new()
            }
        },
        _ => {
            tracing::warn!(entity, "Unrecognized list envelope, treating as empty");
            Vec::new()
        }
    }
}

/// Unwraps a single record from `{data: {...}}` or returns the body as is.
pub fn object_or_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String field that may arrive as a number, bool or null.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

/// Optional string field; empty strings and non-scalars become `None`.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).filter(|s| !s.is_empty()))
}

/// List of strings given as an array, a single string, or nothing.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Boolean that may arrive as a string or number.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}
