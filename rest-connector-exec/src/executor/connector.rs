use std::sync::Arc;

use rest_connector_core::{FailureSettings, RequestConfig, WorkItem};

use crate::executor::engine::{EngineError, TaskService};
use crate::executor::failure::{decide_failure, FailureAction, IgnoreReason};
use crate::executor::http::HttpClient;
use crate::executor::request::build_request;
use crate::executor::response::{map_response, OutputVariables};
use crate::executor::types::{ConnectorConfig, TaskError, TaskOutcome};
use crate::sanitize::{sanitize_headers, sanitize_variables, truncate_body};

/// Handles work items for the REST topic.
///
/// Holds no per-invocation state, so one instance can serve any number of
/// work items concurrently.
#[derive(Clone)]
pub struct RestConnector {
    http: Arc<dyn HttpClient>,
    config: ConnectorConfig,
}

impl RestConnector {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            config: ConnectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ConnectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs one work item and issues at most one terminal call on `service`.
    ///
    /// Failures of the HTTP call or of the item's configuration never surface
    /// here; they are routed through the item's error-handling method. Only a
    /// failing engine call is returned as an error.
    pub async fn execute(
        &self,
        item: &WorkItem,
        service: &dyn TaskService,
    ) -> Result<TaskOutcome, EngineError> {
        tracing::debug!(
            activity_id = %item.activity_id,
            execution_id = %item.execution_id,
            topic = %item.topic_name,
            "executing work item"
        );
        tracing::debug!(variables = ?sanitize_variables(&item.variables), "work item variables");

        let outcome = match self.call(item).await {
            Ok(variables) => {
                service.complete(item, variables.clone()).await?;
                TaskOutcome::Completed { variables }
            }
            Err(err) => {
                let action = self.handle_failure(item, &err, service).await?;
                TaskOutcome::Failed { action }
            }
        };

        tracing::debug!(
            activity_id = %item.activity_id,
            execution_id = %item.execution_id,
            "work item executed"
        );
        Ok(outcome)
    }

    async fn call(&self, item: &WorkItem) -> Result<OutputVariables, TaskError> {
        let cfg = RequestConfig::from_work_item(item)?;
        let req = build_request(&cfg)?;

        tracing::debug!(
            method = %req.method,
            url = %req.url,
            headers = ?sanitize_headers(&req.headers, &self.config.sensitive_headers),
            query = ?req.query,
            body = ?req.body.as_deref().map(|b| truncate_body(b, self.config.max_logged_body_bytes)),
            "sending request"
        );

        let resp = self.http.send(req).await?;

        tracing::debug!(
            status = resp.status,
            body = %truncate_body(&resp.body_text(), self.config.max_logged_body_bytes),
            "received response"
        );
        Ok(map_response(&cfg, &resp))
    }

    async fn handle_failure(
        &self,
        item: &WorkItem,
        err: &TaskError,
        service: &dyn TaskService,
    ) -> Result<FailureAction, EngineError> {
        tracing::debug!(execution_id = %item.execution_id, error = %err, "connector error");

        let settings = FailureSettings::from_work_item(item);
        let action = decide_failure(err, &settings, item.retries);

        match &action {
            FailureAction::BpmnError {
                error_code,
                message,
            } => {
                tracing::debug!(error_code = %error_code, "reporting BPMN error");
                service.handle_bpmn_error(item, error_code, message).await?;
            }
            FailureAction::Retry {
                error_message,
                error_details,
                retries,
                retry_timeout_ms,
            } => {
                tracing::debug!(
                    retries = *retries,
                    retry_timeout_ms = *retry_timeout_ms,
                    "reporting failure for retry"
                );
                service
                    .handle_failure(
                        item,
                        error_message,
                        error_details,
                        *retries,
                        *retry_timeout_ms,
                    )
                    .await?;
            }
            // The item is neither completed nor failed, so the engine will
            // hand it out again after the lock expires.
            FailureAction::Ignore {
                reason: IgnoreReason::NoMethod,
            } => {
                tracing::warn!(
                    execution_id = %item.execution_id,
                    error = %err,
                    "no error handling method specified, error will be ignored"
                );
            }
            FailureAction::Ignore {
                reason: IgnoreReason::InvalidMethod(method),
            } => {
                tracing::warn!(
                    execution_id = %item.execution_id,
                    method = %method,
                    error = %err,
                    "invalid error handling method, error will be ignored"
                );
            }
        }
        Ok(action)
    }
}
