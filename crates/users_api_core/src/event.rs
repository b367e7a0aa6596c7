use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::{BodyError, RequestError};

/// Inbound API Gateway event reduced to what routing needs.
///
/// Accepts both REST API (v1, `httpMethod`/`path`) and HTTP API (v2,
/// `requestContext.http.method`/`rawPath`) payload shapes. The body is kept
/// undecoded; only routes that read it call [`ApiEvent::json_body`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEvent {
    pub method: String,
    pub path: String,
    pub path_parameters: BTreeMap<String, String>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

impl ApiEvent {
    pub fn from_value(event: Value) -> Result<Self, RequestError> {
        let Some(object) = event.as_object() else {
            return Err(RequestError::new("Request payload must be a JSON object"));
        };

        let method = string_field(object, "httpMethod")
            .or_else(|| string_field(object, "method"))
            .or_else(|| {
                object
                    .get("requestContext")
                    .and_then(|context| context.get("http"))
                    .and_then(|http| http.get("method"))
                    .and_then(Value::as_str)
            })
            .ok_or_else(|| RequestError::new("Request method is missing"))?
            .to_ascii_uppercase();

        let path = string_field(object, "path")
            .or_else(|| string_field(object, "rawPath"))
            .ok_or_else(|| RequestError::new("Request path is missing"))?
            .to_string();

        let path_parameters = object
            .get("pathParameters")
            .and_then(Value::as_object)
            .map(|parameters| {
                parameters
                    .iter()
                    .filter_map(|(key, value)| {
                        value.as_str().map(|text| (key.clone(), text.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Inline object bodies are kept as their JSON text.
        let body = match object.get("body") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };
        let is_base64_encoded = object
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            method,
            path,
            path_parameters,
            body,
            is_base64_encoded,
        })
    }

    /// Decodes the body as JSON. A missing or blank body is `None`.
    pub fn json_body(&self) -> Result<Option<Value>, BodyError> {
        let Some(raw) = self.body.as_deref() else {
            return Ok(None);
        };

        let decoded;
        let text = if self.is_base64_encoded {
            let bytes = STANDARD
                .decode(raw.trim())
                .map_err(|error| BodyError::Base64(error.to_string()))?;
            decoded =
                String::from_utf8(bytes).map_err(|error| BodyError::Utf8(error.to_string()))?;
            decoded.as_str()
        } else {
            raw
        };

        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(text)
            .map(Some)
            .map_err(|error| BodyError::Json(error.to_string()))
    }
}

fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}
