use async_trait::async_trait;
use rest_connector_core::WorkItem;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::executor::response::OutputVariables;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("engine rejected {operation} for execution {execution_id}: {message}")]
    Rejected {
        operation: &'static str,
        execution_id: String,
        message: String,
    },
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

/// Terminal actions the workflow engine accepts for a work item.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn complete(&self, item: &WorkItem, variables: OutputVariables)
        -> Result<(), EngineError>;

    async fn handle_bpmn_error(
        &self,
        item: &WorkItem,
        error_code: &str,
        message: &str,
    ) -> Result<(), EngineError>;

    async fn handle_failure(
        &self,
        item: &WorkItem,
        error_message: &str,
        error_details: &str,
        retries: i32,
        retry_timeout_ms: i64,
    ) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum TaskCall {
    Complete {
        execution_id: String,
        variables: OutputVariables,
    },
    BpmnError {
        execution_id: String,
        error_code: String,
        message: String,
    },
    Failure {
        execution_id: String,
        error_message: String,
        error_details: String,
        retries: i32,
        retry_timeout_ms: i64,
    },
}

/// Records every terminal call instead of talking to an engine.
#[derive(Debug, Default)]
pub struct InMemoryTaskService {
    calls: Mutex<Vec<TaskCall>>,
}

impl InMemoryTaskService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn calls(&self) -> Vec<TaskCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: TaskCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl TaskService for InMemoryTaskService {
    async fn complete(
        &self,
        item: &WorkItem,
        variables: OutputVariables,
    ) -> Result<(), EngineError> {
        self.record(TaskCall::Complete {
            execution_id: item.execution_id.clone(),
            variables,
        })
        .await;
        Ok(())
    }

    async fn handle_bpmn_error(
        &self,
        item: &WorkItem,
        error_code: &str,
        message: &str,
    ) -> Result<(), EngineError> {
        self.record(TaskCall::BpmnError {
            execution_id: item.execution_id.clone(),
            error_code: error_code.to_string(),
            message: message.to_string(),
        })
        .await;
        Ok(())
    }

    async fn handle_failure(
        &self,
        item: &WorkItem,
        error_message: &str,
        error_details: &str,
        retries: i32,
        retry_timeout_ms: i64,
    ) -> Result<(), EngineError> {
        self.record(TaskCall::Failure {
            execution_id: item.execution_id.clone(),
            error_message: error_message.to_string(),
            error_details: error_details.to_string(),
            retries,
            retry_timeout_ms,
        })
        .await;
        Ok(())
    }
}
