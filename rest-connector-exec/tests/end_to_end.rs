use std::sync::Arc;

use rest_connector_core::task::{
    PARAM_ERROR_HANDLING_METHOD, PARAM_HTTP_HEADERS, PARAM_HTTP_METHOD, PARAM_HTTP_PAYLOAD,
    PARAM_HTTP_URL, PARAM_OUTPUT_VARIABLE, PARAM_STATUS_CODE_VARIABLE,
};
use rest_connector_core::WorkItem;
use rest_connector_exec::{
    HttpClientConfig, InMemoryTaskService, ReqwestHttpClient, RestConnector, TaskCall,
    VariableValue,
};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector() -> RestConnector {
    RestConnector::new(Arc::new(
        ReqwestHttpClient::new(HttpClientConfig::default()).unwrap(),
    ))
}

#[tokio::test]
async fn get_with_headers_completes_without_variables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("header1", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored"))
        .expect(1)
        .mount(&server)
        .await;

    let item = WorkItem::new("callService", "exec-1")
        .with_variable(PARAM_HTTP_METHOD, "GET")
        .with_variable(PARAM_HTTP_URL, server.uri())
        .with_variable(PARAM_HTTP_HEADERS, "header1=abc");

    let service = InMemoryTaskService::new();
    connector().execute(&item, &service).await.unwrap();

    assert!(matches!(
        service.calls().await.as_slice(),
        [TaskCall::Complete { variables, .. }] if variables.is_empty()
    ));
}

#[tokio::test]
async fn post_maps_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"sku":"A1"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":7}"#))
        .expect(1)
        .mount(&server)
        .await;

    let item = WorkItem::new("placeOrder", "exec-2")
        .with_variable(PARAM_HTTP_METHOD, "post")
        .with_variable(PARAM_HTTP_URL, format!("{}/orders", server.uri()))
        .with_variable(PARAM_HTTP_HEADERS, r#"{"Content-Type": "application/json"}"#)
        .with_variable(PARAM_HTTP_PAYLOAD, r#"{"sku":"A1"}"#)
        .with_variable(PARAM_OUTPUT_VARIABLE, "order")
        .with_variable(PARAM_STATUS_CODE_VARIABLE, "orderStatus");

    let service = InMemoryTaskService::new();
    connector().execute(&item, &service).await.unwrap();

    match service.calls().await.as_slice() {
        [TaskCall::Complete { variables, .. }] => {
            assert_eq!(variables["order"], VariableValue::from(r#"{"id":7}"#));
            assert_eq!(variables["orderStatus"], VariableValue::Integer(201));
        }
        other => panic!("expected completion, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_reported_as_bpmn_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let item = WorkItem::new("callService", "exec-3")
        .with_variable(PARAM_HTTP_URL, format!("http://127.0.0.1:{port}/"))
        .with_variable(PARAM_ERROR_HANDLING_METHOD, "BPMNError");

    let service = InMemoryTaskService::new();
    connector().execute(&item, &service).await.unwrap();

    match service.calls().await.as_slice() {
        [TaskCall::BpmnError {
            error_code,
            message,
            ..
        }] => {
            assert_eq!(error_code, "CONNECTOR_ERROR");
            assert!(message.starts_with("connect/dns/tls error"), "{message}");
        }
        other => panic!("expected BPMN error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_connector_serves_concurrent_work_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(8)
        .mount(&server)
        .await;

    let connector = connector();
    let service = Arc::new(InMemoryTaskService::new());

    let mut handles = Vec::new();
    for i in 0..8 {
        let connector = connector.clone();
        let service = service.clone();
        let item = WorkItem::new("callService", format!("exec-{i}"))
            .with_variable(PARAM_HTTP_URL, format!("{}/items/{i}", server.uri()))
            .with_variable(PARAM_OUTPUT_VARIABLE, "body");
        handles.push(tokio::spawn(async move {
            connector.execute(&item, service.as_ref()).await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    let calls = service.calls().await;
    assert_eq!(calls.len(), 8);
    let mut ids: Vec<String> = calls
        .into_iter()
        .map(|c| match c {
            TaskCall::Complete { execution_id, .. } => execution_id,
            other => panic!("expected completion, got {other:?}"),
        })
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}
