use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::executor::request::HttpRequestParts;
use crate::executor::response::HttpResponseParts;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    #[error("request timed out")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("HTTP status {status}")]
    Status { status: u16, body: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

/// Executes one assembled request. Implementations are shared across
/// concurrent invocations.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, ConnectorError>;
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_response_bytes: usize,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// When false, a non-2xx response is returned like any other response.
    pub fail_on_error_status: bool,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
            follow_redirects: true,
            max_redirects: 10,
            fail_on_error_status: false,
            user_agent: concat!("rest-connector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct ReqwestHttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl ReqwestHttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, ConnectorError> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };
        let client = reqwest::Client::builder()
            .redirect(redirect)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConnectorError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, ConnectorError> {
        let method = reqwest::Method::from_bytes(req.method.as_bytes())
            .map_err(|e| ConnectorError::InvalidRequest(format!("method {:?}: {e}", req.method)))?;
        let mut rb = self.client.request(method, req.url);

        for (k, v) in &req.headers {
            rb = rb.header(k.as_str(), v.as_str());
        }
        if !req.query.is_empty() {
            rb = rb.query(&req.query);
        }
        if let Some(body) = req.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let max_bytes = self.config.max_response_bytes;
        if resp.content_length().is_some_and(|len| len > max_bytes as u64) {
            return Err(ConnectorError::ResponseTooLarge { max_bytes });
        }
        let body = resp.bytes().await.map_err(map_reqwest_error)?;
        if body.len() > max_bytes {
            return Err(ConnectorError::ResponseTooLarge { max_bytes });
        }
        let response = HttpResponseParts {
            status,
            headers,
            body: body.to_vec(),
        };

        if self.config.fail_on_error_status && !(200..300).contains(&status) {
            return Err(ConnectorError::Status {
                status,
                body: response.body_text(),
            });
        }
        Ok(response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ConnectorError {
    if e.is_timeout() {
        return ConnectorError::Timeout;
    }
    if e.is_builder() {
        return ConnectorError::InvalidRequest(e.to_string());
    }
    if e.is_connect() || e.is_request() {
        return ConnectorError::Network(e.to_string());
    }
    ConnectorError::Other(e.to_string())
}
