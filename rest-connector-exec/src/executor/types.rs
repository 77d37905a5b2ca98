use rest_connector_core::{ConfigError, ValidationError};
use serde::Serialize;

use crate::executor::failure::FailureAction;
use crate::executor::http::ConnectorError;
use crate::executor::response::OutputVariables;
use crate::sanitize::SensitiveHeadersConfig;

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub sensitive_headers: SensitiveHeadersConfig,
    /// Upper bound for request and response bodies written to debug logs.
    pub max_logged_body_bytes: usize,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            sensitive_headers: SensitiveHeadersConfig::default(),
            max_logged_body_bytes: 1024,
        }
    }
}

/// Any failure between reading the work item and receiving a response.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl From<ValidationError> for TaskError {
    fn from(e: ValidationError) -> Self {
        Self::Config(ConfigError::Validation(e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    Completed { variables: OutputVariables },
    Failed { action: FailureAction },
}
