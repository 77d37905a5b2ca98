use std::collections::BTreeMap;

use rest_connector_core::{strip_whitespace, RequestConfig, ValidationError};

/// Methods that may carry a request body.
pub const PAYLOAD_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestParts {
    pub method: String,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: Option<String>,
}

pub fn build_request(cfg: &RequestConfig) -> Result<HttpRequestParts, ValidationError> {
    let url = url::Url::parse(&cfg.url).map_err(|e| ValidationError::InvalidUrl {
        url: cfg.url.clone(),
        reason: e.to_string(),
    })?;

    let mut headers = BTreeMap::new();
    if let Some(configured) = &cfg.headers {
        for (k, v) in configured {
            headers.insert(strip_whitespace(k), v.clone());
        }
    }

    let query = cfg.query_params.clone().unwrap_or_default();

    let body = match &cfg.payload {
        Some(payload) if PAYLOAD_METHODS.contains(&cfg.method.as_str()) => Some(payload.clone()),
        Some(_) => {
            tracing::warn!(
                method = %cfg.method,
                allowed = ?PAYLOAD_METHODS,
                "ignoring payload because the HTTP method does not accept one"
            );
            None
        }
        None => None,
    };

    Ok(HttpRequestParts {
        method: cfg.method.clone(),
        url,
        headers,
        query,
        body,
    })
}
