use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Serializes `payload` as the response body. A payload that fails to
/// serialize degrades to the generic internal error response.
pub fn json_response(status_code: u16, payload: &impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(payload) {
        Ok(body) => envelope(status_code, body),
        Err(error) => {
            tracing::error!(
                component = "response",
                error = %error,
                "failed to serialize response payload"
            );
            internal_error_response()
        }
    }
}

pub fn empty_response(status_code: u16) -> ApiGatewayResponse {
    envelope(status_code, String::new())
}

pub fn error_response(status_code: u16, error: &str, message: &str) -> ApiGatewayResponse {
    let payload = json!({
        "error": error,
        "message": message,
    });
    envelope(status_code, payload.to_string())
}

pub fn bad_request_response(message: &str) -> ApiGatewayResponse {
    error_response(400, "bad_request", message)
}

pub fn not_found_response() -> ApiGatewayResponse {
    error_response(404, "not_found", "User not found")
}

pub fn internal_error_response() -> ApiGatewayResponse {
    error_response(500, "internal_error", INTERNAL_ERROR_MESSAGE)
}

fn envelope(status_code: u16, body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn envelope_uses_api_gateway_field_names() {
        let response = json_response(200, &json!({"ok": true}));
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(value["statusCode"], json!(200));
        assert_eq!(value["headers"]["Content-Type"], json!("application/json"));
        assert_eq!(value["body"], json!("{\"ok\":true}"));
    }

    #[test]
    fn unserializable_payload_becomes_generic_internal_error() {
        // JSON object keys must be strings.
        let payload = BTreeMap::from([((1, 2), "value")]);
        let response = json_response(200, &payload);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json(),
            Some(json!({"error": "internal_error", "message": INTERNAL_ERROR_MESSAGE}))
        );
    }

    #[test]
    fn empty_response_has_no_body() {
        let response = empty_response(204);

        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
    }
}
