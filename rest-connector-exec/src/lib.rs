#![forbid(unsafe_code)]

//! Runtime for the REST connector: turns a work item into one HTTP call and
//! reports exactly one outcome back to the engine.

pub mod executor;
pub mod sanitize;

pub use crate::executor::{
    ConnectorConfig, ConnectorError, EngineError, FailureAction, HttpClient, HttpClientConfig,
    HttpRequestParts, HttpResponseParts, InMemoryTaskService, OutputVariables, ReqwestHttpClient,
    RestConnector, TaskCall, TaskError, TaskOutcome, TaskService, VariableValue,
};
