use std::collections::BTreeMap;

use rest_connector_core::RequestConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseParts {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponseParts {
    /// Body as text; invalid UTF-8 sequences are replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Integer(i64),
    String(String),
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<u16> for VariableValue {
    fn from(value: u16) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// Variables handed to the engine when a work item completes.
pub type OutputVariables = BTreeMap<String, VariableValue>;

/// The body is stored as a plain string, never as a structured value.
pub fn map_response(cfg: &RequestConfig, resp: &HttpResponseParts) -> OutputVariables {
    let mut variables = OutputVariables::new();
    if let Some(name) = &cfg.output_variable {
        variables.insert(name.clone(), resp.body_text().into());
    }
    if let Some(name) = &cfg.status_code_variable {
        variables.insert(name.clone(), resp.status.into());
    }
    variables
}
