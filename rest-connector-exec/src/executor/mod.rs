pub mod connector;
pub mod engine;
pub mod failure;
pub mod http;
pub mod request;
pub mod response;
mod types;

pub use connector::RestConnector;
pub use engine::{EngineError, InMemoryTaskService, TaskCall, TaskService};
pub use failure::{decide_failure, FailureAction, IgnoreReason};
pub use http::{ConnectorError, HttpClient, HttpClientConfig, ReqwestHttpClient};
pub use request::{build_request, HttpRequestParts};
pub use response::{map_response, HttpResponseParts, OutputVariables, VariableValue};
pub use types::{ConnectorConfig, TaskError, TaskOutcome};
