use rest_connector_core::{ErrorHandlingMethod, FailureSettings};
use serde::Serialize;

use crate::executor::types::TaskError;

pub const CONNECTOR_ERROR_CODE: &str = "CONNECTOR_ERROR";
pub const RETRY_ERROR_MESSAGE: &str = "HTTP request failed";

/// The single terminal action taken for a failed work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FailureAction {
    BpmnError {
        error_code: String,
        message: String,
    },
    Retry {
        error_message: String,
        error_details: String,
        retries: i32,
        retry_timeout_ms: i64,
    },
    /// No engine call is made; the engine redelivers once the lock expires.
    Ignore { reason: IgnoreReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "method", rename_all = "snake_case")]
pub enum IgnoreReason {
    NoMethod,
    InvalidMethod(String),
}

/// `engine_retries` is the counter the engine attaches once it has seen a
/// failure for this item; the configured budget only applies before that.
pub fn decide_failure(
    error: &TaskError,
    settings: &FailureSettings,
    engine_retries: Option<i32>,
) -> FailureAction {
    match &settings.method {
        None => FailureAction::Ignore {
            reason: IgnoreReason::NoMethod,
        },
        Some(ErrorHandlingMethod::Unrecognized(method)) => FailureAction::Ignore {
            reason: IgnoreReason::InvalidMethod(method.clone()),
        },
        Some(ErrorHandlingMethod::BpmnError) => FailureAction::BpmnError {
            error_code: CONNECTOR_ERROR_CODE.to_string(),
            message: error.to_string(),
        },
        Some(ErrorHandlingMethod::Failure) => {
            let retries = match engine_retries {
                Some(n) => n.saturating_sub(1).max(0),
                None => settings
                    .retries
                    .map(|n| n.clamp(0, i64::from(i32::MAX)) as i32)
                    .unwrap_or(0),
            };
            let retry_timeout_ms = settings
                .retry_backoff
                .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
                .unwrap_or(0);
            FailureAction::Retry {
                error_message: RETRY_ERROR_MESSAGE.to_string(),
                error_details: error.to_string(),
                retries,
                retry_timeout_ms,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::executor::http::ConnectorError;

    fn failure_settings() -> FailureSettings {
        FailureSettings {
            method: Some(ErrorHandlingMethod::Failure),
            ..Default::default()
        }
    }

    #[test]
    fn exhausted_engine_counter_does_not_go_negative() {
        let err = TaskError::from(ConnectorError::Timeout);
        let action = decide_failure(&err, &failure_settings(), Some(0));
        assert!(matches!(action, FailureAction::Retry { retries: 0, .. }));
    }

    #[test]
    fn oversized_retry_budget_saturates() {
        let err = TaskError::from(ConnectorError::Timeout);
        let settings = FailureSettings {
            retries: Some(i64::MAX),
            retry_backoff: Some(Duration::from_secs(2)),
            ..failure_settings()
        };
        let action = decide_failure(&err, &settings, None);
        assert_eq!(
            action,
            FailureAction::Retry {
                error_message: RETRY_ERROR_MESSAGE.to_string(),
                error_details: "request timed out".to_string(),
                retries: i32::MAX,
                retry_timeout_ms: 2000,
            }
        );
    }
}
