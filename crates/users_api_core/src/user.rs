use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

/// Identifier assigned by the store on creation. Never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Whether a variant insists on an email address for create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailPolicy {
    Required,
    #[default]
    Optional,
}

/// Validated body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: Option<String>,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            name: name.into(),
            email,
        }
    }

    pub fn from_body(body: Option<&Value>, policy: EmailPolicy) -> Result<Self, RequestError> {
        let Some(body) = body else {
            return Err(RequestError::new("Request body is required"));
        };
        let Some(fields) = body.as_object() else {
            return Err(RequestError::new("Request body must be a JSON object"));
        };

        let name = required_string(fields, "name")?;
        let email = match policy {
            EmailPolicy::Required => Some(required_string(fields, "email")?),
            EmailPolicy::Optional => optional_string(fields, "email")?,
        };

        Ok(Self { name, email })
    }

    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

fn required_string(fields: &Map<String, Value>, field: &str) -> Result<String, RequestError> {
    optional_string(fields, field)?
        .ok_or_else(|| RequestError::new(format!("Field '{field}' is required")))
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, RequestError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err(RequestError::new(format!("Field '{field}' cannot be empty")))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Some(_) => Err(RequestError::new(format!("Field '{field}' must be a string"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_and_trims_required_fields() {
        let body = json!({"name": "  Ada ", "email": "ada@example.com"});
        let input = UserInput::from_body(Some(&body), EmailPolicy::Required)
            .expect("body should validate");

        assert_eq!(input.name, "Ada");
        assert_eq!(input.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn rejects_missing_email_when_required() {
        let body = json!({"name": "Ada"});
        let error = UserInput::from_body(Some(&body), EmailPolicy::Required)
            .expect_err("missing email should fail");

        assert_eq!(error.message(), "Field 'email' is required");
    }

    #[test]
    fn accepts_missing_email_when_optional() {
        let body = json!({"name": "Ada"});
        let input = UserInput::from_body(Some(&body), EmailPolicy::Optional)
            .expect("email is optional");

        assert_eq!(input.email, None);
    }

    #[test]
    fn rejects_blank_and_non_string_names() {
        let blank = json!({"name": "   "});
        let numeric = json!({"name": 7});

        let blank_error = UserInput::from_body(Some(&blank), EmailPolicy::Optional)
            .expect_err("blank name should fail");
        let numeric_error = UserInput::from_body(Some(&numeric), EmailPolicy::Optional)
            .expect_err("numeric name should fail");

        assert_eq!(blank_error.message(), "Field 'name' cannot be empty");
        assert_eq!(numeric_error.message(), "Field 'name' must be a string");
    }

    #[test]
    fn rejects_missing_and_non_object_bodies() {
        let missing = UserInput::from_body(None, EmailPolicy::Optional)
            .expect_err("missing body should fail");
        let array = json!(["Ada"]);
        let not_object = UserInput::from_body(Some(&array), EmailPolicy::Optional)
            .expect_err("array body should fail");

        assert_eq!(missing.message(), "Request body is required");
        assert_eq!(not_object.message(), "Request body must be a JSON object");
    }

    #[test]
    fn serializes_id_under_table_key_and_omits_absent_email() {
        let user = UserInput::new("Ada", None).into_user(UserId::new("1"));
        let value = serde_json::to_value(&user).expect("user should serialize");

        assert_eq!(value, json!({"userId": "1", "name": "Ada"}));
    }
}
