use thiserror::Error;

/// Failures raised by a [`crate::store::UserStore`] implementation.
///
/// Every variant is an internal failure from the caller's point of view; the
/// detail is logged and never echoed back in a response body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("in-memory store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}

/// A request body that could not be decoded into JSON.
///
/// The detail is for logs only; callers get a fixed message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("body is not valid base64: {0}")]
    Base64(String),

    #[error("body is not UTF-8: {0}")]
    Utf8(String),

    #[error("body is not valid JSON: {0}")]
    Json(String),
}

/// A request the handler refuses before touching storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
