//! Coercion of raw string variables into typed values.
//!
//! Map-valued variables accept two encodings: a JSON object (`{"a": "b"}`) or a
//! `;`-separated list of `key=value` pairs (`a=b; c = d`).

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::error::ParseError;

pub fn decode_map(input: &str) -> Result<BTreeMap<String, String>, ParseError> {
    let trimmed = input.trim();
    if trimmed.starts_with('{') {
        decode_json_map(trimmed)
    } else {
        decode_pairs(trimmed)
    }
}

fn decode_json_map(input: &str) -> Result<BTreeMap<String, String>, ParseError> {
    let raw: serde_json::Map<String, JsonValue> = serde_json::from_str(input)?;
    let mut map = BTreeMap::new();
    for (key, value) in raw {
        let value = match value {
            JsonValue::String(s) => s,
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(ParseError::NonScalarValue { key });
            }
        };
        map.insert(key, value);
    }
    Ok(map)
}

fn decode_pairs(input: &str) -> Result<BTreeMap<String, String>, ParseError> {
    let mut segments: Vec<&str> = input.split(';').map(str::trim).collect();
    // `a=b;` is accepted, so drop empty segments at the tail only.
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    if segments.is_empty() {
        return Err(ParseError::InvalidPair(input.to_string()));
    }

    let mut map = BTreeMap::new();
    for segment in segments {
        let mut parts = segment.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::InvalidPair(segment.to_string()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidPair(segment.to_string()));
        }
        map.insert(key.to_string(), value.trim().to_string());
    }
    Ok(map)
}

pub fn decode_int(input: &str) -> Result<i64, ParseError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|source| ParseError::InvalidInteger {
            value: trimmed.to_string(),
            source,
        })
}

/// Removes every whitespace character, not just the leading and trailing ones.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}
