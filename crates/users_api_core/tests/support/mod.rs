#![allow(dead_code)]

use serde_json::{json, Value};
use users_api_core::{ApiGatewayResponse, HandlerConfig, UsersHandler};

/// Builds a REST API (v1) proxy event the way API Gateway delivers it.
pub fn rest_event(method: &str, path: &str, body: Option<Value>) -> Value {
    json!({
        "httpMethod": method,
        "path": path,
        "pathParameters": null,
        "body": body.map(|value| value.to_string()),
    })
}

pub fn send(
    handler: &UsersHandler<'_>,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> ApiGatewayResponse {
    handler.handle_event(rest_event(method, path, body))
}

/// Sends a body exactly as given, without JSON-encoding it first.
pub fn send_raw(
    handler: &UsersHandler<'_>,
    method: &str,
    path: &str,
    raw_body: &str,
) -> ApiGatewayResponse {
    handler.handle_event(json!({
        "httpMethod": method,
        "path": path,
        "pathParameters": null,
        "body": raw_body,
    }))
}

pub fn body(response: &ApiGatewayResponse) -> Value {
    response
        .body_json()
        .expect("response body should be valid json")
}

pub fn created_id(response: &ApiGatewayResponse) -> String {
    body(response)["userId"]
        .as_str()
        .expect("created user should carry a string userId")
        .to_string()
}

pub fn memory_config() -> HandlerConfig {
    HandlerConfig::default()
}
