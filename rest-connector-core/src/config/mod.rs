//! Typed views over a work item's string variables.
//!
//! Every accessor treats an absent or blank variable as "not configured". Only
//! the URL is mandatory.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::decode::{decode_int, decode_map};
use crate::error::{ConfigError, ValidationError};
use crate::task::{
    WorkItem, PARAM_ERROR_HANDLING_METHOD, PARAM_HTTP_HEADERS, PARAM_HTTP_METHOD,
    PARAM_HTTP_PAYLOAD, PARAM_HTTP_QUERY_PARAMS, PARAM_HTTP_URL, PARAM_OUTPUT_VARIABLE,
    PARAM_RETRIES, PARAM_RETRY_BACKOFF, PARAM_STATUS_CODE_VARIABLE,
};

pub const DEFAULT_HTTP_METHOD: &str = "GET";
pub const ERROR_METHOD_BPMN_ERROR: &str = "BPMNError";
pub const ERROR_METHOD_FAILURE: &str = "Failure";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Uppercased; `GET` when not configured.
    pub method: String,
    pub url: String,
    pub headers: Option<BTreeMap<String, String>>,
    pub query_params: Option<BTreeMap<String, String>>,
    pub payload: Option<String>,
    pub output_variable: Option<String>,
    pub status_code_variable: Option<String>,
}

impl RequestConfig {
    pub fn from_work_item(item: &WorkItem) -> Result<Self, ConfigError> {
        let method = item
            .non_blank(PARAM_HTTP_METHOD)
            .map(|m| m.trim().to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_HTTP_METHOD.to_string());

        let url = item
            .non_blank(PARAM_HTTP_URL)
            .map(|u| u.trim().to_string())
            .ok_or(ValidationError::MissingUrl)?;

        Ok(Self {
            method,
            url,
            headers: map_variable(item, PARAM_HTTP_HEADERS)?,
            query_params: map_variable(item, PARAM_HTTP_QUERY_PARAMS)?,
            payload: item.non_blank(PARAM_HTTP_PAYLOAD).map(str::to_string),
            output_variable: name_variable(item, PARAM_OUTPUT_VARIABLE),
            status_code_variable: name_variable(item, PARAM_STATUS_CODE_VARIABLE),
        })
    }
}

fn map_variable(
    item: &WorkItem,
    name: &str,
) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
    item.non_blank(name)
        .map(|raw| decode_map(raw).map_err(|e| ConfigError::parse(name, e)))
        .transpose()
}

fn name_variable(item: &WorkItem, name: &str) -> Option<String> {
    item.non_blank(name).map(|v| v.trim().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorHandlingMethod {
    /// Report a business error into the process.
    BpmnError,
    /// Report a technical failure and let the engine retry.
    Failure,
    Unrecognized(String),
}

impl ErrorHandlingMethod {
    /// Matching is exact; `bpmnerror` is not `BPMNError`.
    pub fn parse(value: &str) -> Self {
        match value {
            ERROR_METHOD_BPMN_ERROR => Self::BpmnError,
            ERROR_METHOD_FAILURE => Self::Failure,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// Settings consulted only once an invocation has failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureSettings {
    pub method: Option<ErrorHandlingMethod>,
    /// Initial retry budget, used until the engine tracks its own counter.
    pub retries: Option<i64>,
    pub retry_backoff: Option<Duration>,
}

impl FailureSettings {
    /// Never fails: the item is already failing, so an unreadable retry
    /// setting is logged and treated as absent.
    pub fn from_work_item(item: &WorkItem) -> Self {
        let method = item
            .non_blank(PARAM_ERROR_HANDLING_METHOD)
            .map(|m| ErrorHandlingMethod::parse(m.trim()));

        let retries = lenient_int(item, PARAM_RETRIES).map(|n| n.max(0));
        let retry_backoff = lenient_int(item, PARAM_RETRY_BACKOFF)
            .map(|secs| Duration::from_secs(secs.max(0) as u64));

        Self {
            method,
            retries,
            retry_backoff,
        }
    }
}

fn lenient_int(item: &WorkItem, name: &str) -> Option<i64> {
    let raw = item.non_blank(name)?;
    match decode_int(raw) {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(variable = name, error = %e, "ignoring unparseable integer variable");
            None
        }
    }
}
