use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const PARAM_HTTP_METHOD: &str = "httpMethod";
pub const PARAM_HTTP_URL: &str = "httpURL";
pub const PARAM_HTTP_HEADERS: &str = "httpHeaders";
pub const PARAM_HTTP_QUERY_PARAMS: &str = "httpQueryParams";
pub const PARAM_HTTP_PAYLOAD: &str = "httpPayload";
pub const PARAM_OUTPUT_VARIABLE: &str = "httpOutParameter";
pub const PARAM_STATUS_CODE_VARIABLE: &str = "httpStatusCodeParameter";
pub const PARAM_ERROR_HANDLING_METHOD: &str = "errorHandlingMethod";
pub const PARAM_RETRIES: &str = "retries";
pub const PARAM_RETRY_BACKOFF: &str = "retryBackoff";

/// One unit of work delivered by the workflow engine.
///
/// The connector only reads from it; lifecycle transitions belong to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[serde(default)]
    pub activity_id: String,
    #[serde(default)]
    pub execution_id: String,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// `None` until the engine has recorded a failure for this item.
    #[serde(default)]
    pub retries: Option<i32>,
}

impl WorkItem {
    pub fn new(activity_id: impl Into<String>, execution_id: impl Into<String>) -> Self {
        Self {
            activity_id: activity_id.into(),
            execution_id: execution_id.into(),
            ..Default::default()
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_retries(mut self, retries: i32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Like [`WorkItem::variable`], but whitespace-only values count as absent.
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        self.variable(name).filter(|v| !v.trim().is_empty())
    }
}
