use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rest_connector_core::WorkItem;
use rest_connector_exec::{
    InMemoryTaskService, ReqwestHttpClient, RestConnector, TaskCall, TaskOutcome,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{HttpArgs, OutputArgs};

#[derive(Serialize)]
struct RunResult {
    execution_id: String,
    #[serde(flatten)]
    outcome: TaskOutcome,
    engine_calls: Vec<TaskCall>,
}

pub async fn run_cmd(
    path: &Path,
    set_variables: &[String],
    retries: Option<i32>,
    output: OutputArgs,
    http: HttpArgs,
) -> i32 {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", path.display()),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let mut item = match parse_work_item(&content) {
        Ok(item) => item,
        Err(msg) => {
            print_error(output.format, output.quiet, &msg);
            return exit_codes::INVALID_INPUT;
        }
    };
    for s in set_variables {
        match s.split_once('=') {
            Some((k, v)) => {
                item.variables.insert(k.to_string(), v.to_string());
            }
            None => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("--set expects KEY=VALUE, got {s:?}"),
                );
                return exit_codes::INVALID_INPUT;
            }
        }
    }
    if retries.is_some() {
        item.retries = retries;
    }
    if item.execution_id.is_empty() {
        item.execution_id = "local".to_string();
    }
    tracing::debug!(
        path = %path.display(),
        variables = item.variables.len(),
        retries = ?item.retries,
        "loaded work item"
    );

    let client = match ReqwestHttpClient::new(http.to_config()) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let connector = RestConnector::new(Arc::new(client));
    let service = InMemoryTaskService::new();

    let outcome = match connector.execute(&item, &service).await {
        Ok(o) => o,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let code = match outcome {
        TaskOutcome::Completed { .. } => exit_codes::SUCCESS,
        TaskOutcome::Failed { .. } => exit_codes::TASK_FAILED,
    };
    let result = RunResult {
        execution_id: item.execution_id.clone(),
        outcome,
        engine_calls: service.calls().await,
    };
    print_result(output.format, output.quiet, &result);
    code
}

/// Accepts either a full work item (`{"variables": {...}, "retries": 2}`) or a
/// flat map of variables. Scalar values are stringified the way the engine
/// would hand them over.
fn parse_work_item(content: &str) -> Result<WorkItem, String> {
    let value: JsonValue = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|_| "work item file is neither valid JSON nor YAML".to_string())?,
    };

    let JsonValue::Object(mut obj) = value else {
        return Err("work item file must contain an object".to_string());
    };

    if let Some(vars) = obj.remove("variables") {
        obj.insert("variables".to_string(), JsonValue::Object(stringify(vars)?));
        return serde_json::from_value(JsonValue::Object(obj))
            .map_err(|e| format!("invalid work item: {e}"));
    }

    let variables = stringify(JsonValue::Object(obj))?
        .into_iter()
        .filter_map(|(k, v)| match v {
            JsonValue::String(s) => Some((k, s)),
            _ => None,
        })
        .collect::<BTreeMap<_, _>>();
    Ok(WorkItem {
        variables,
        ..Default::default()
    })
}

fn stringify(vars: JsonValue) -> Result<serde_json::Map<String, JsonValue>, String> {
    let JsonValue::Object(vars) = vars else {
        return Err("`variables` must be an object".to_string());
    };
    let mut out = serde_json::Map::new();
    for (k, v) in vars {
        let s = match v {
            JsonValue::String(s) => s,
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Null => continue,
            // Nested maps are accepted as JSON-encoded map variables.
            other @ (JsonValue::Array(_) | JsonValue::Object(_)) => other.to_string(),
        };
        out.insert(k, JsonValue::String(s));
    }
    Ok(out)
}
