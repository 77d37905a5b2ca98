//! Redaction helpers for anything the connector writes to its logs.

use std::collections::BTreeMap;

use rest_connector_core::task::PARAM_HTTP_HEADERS;

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone)]
pub struct SensitiveHeadersConfig {
    /// Lowercased header names that must always be redacted.
    pub always_redact: Vec<String>,
}

impl Default for SensitiveHeadersConfig {
    fn default() -> Self {
        Self {
            always_redact: vec![
                "authorization".to_string(),
                "proxy-authorization".to_string(),
                "cookie".to_string(),
                "set-cookie".to_string(),
            ],
        }
    }
}

pub fn sanitize_headers(
    headers: &BTreeMap<String, String>,
    sensitive: &SensitiveHeadersConfig,
) -> BTreeMap<String, String> {
    let mut out = headers.clone();
    for name in &sensitive.always_redact {
        redact_case_insensitive(&mut out, name);
    }
    out
}

/// The raw header variable may carry credentials in either map encoding, so
/// it is never logged as-is.
pub fn sanitize_variables(variables: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut out = variables.clone();
    if let Some(v) = out.get_mut(PARAM_HTTP_HEADERS) {
        *v = REDACTED.to_string();
    }
    out
}

pub fn truncate_body(body: &str, max_bytes: usize) -> String {
    if body.len() <= max_bytes {
        return body.to_string();
    }
    let mut end = max_bytes;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...<truncated {} bytes>", &body[..end], body.len() - end)
}

fn redact_case_insensitive(map: &mut BTreeMap<String, String>, header_lower: &str) {
    let keys = map
        .keys()
        .filter(|k| k.eq_ignore_ascii_case(header_lower))
        .cloned()
        .collect::<Vec<_>>();
    for k in keys {
        map.insert(k, REDACTED.to_string());
    }
}
