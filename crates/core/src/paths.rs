//! Path and response-shape helpers shared by the entity clients

use momentum_domain::{MomentumError, Result};
use serde_json::Value;

/// Percent-encode an identifier for use as a path segment or query value.
///
/// Empty identifiers are rejected before any request is made.
pub fn encode_id(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MomentumError::InvalidInput(format!("{label} must not be empty")));
    }
    Ok(urlencoding::encode(trimmed).into_owned())
}

/// Items of a list response, whether it is a bare array or wrapped in a
/// `data` or `results` field. Anything else yields no items.
pub fn list_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["data", "results"]
            .iter()
            .find_map(|field| match map.remove(*field) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Require an exact number of ASCII digits, e.g. for CVR numbers.
pub fn require_digits(label: &str, value: &str, len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.len() == len && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(MomentumError::InvalidInput(format!("{label} must be {len} digits, got {value:?}")))
    }
}
