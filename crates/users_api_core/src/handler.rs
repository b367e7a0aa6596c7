use serde_json::Value;

use crate::error::StoreError;
use crate::event::ApiEvent;
use crate::response::{
    bad_request_response, empty_response, internal_error_response, json_response,
    not_found_response, ApiGatewayResponse,
};
use crate::routing::Route;
use crate::store::{Deleted, UserStore};
use crate::user::{EmailPolicy, UserInput};

pub const UNSUPPORTED_REQUEST_MESSAGE: &str = "Unsupported request";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body is not valid JSON";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandlerConfig {
    pub email_policy: EmailPolicy,
    pub base_path: Option<String>,
}

/// Entry point for one inbound event. Holds the store by reference so the
/// caller decides its lifetime (per cold start for Lambda, per test here).
pub struct UsersHandler<'a> {
    store: &'a dyn UserStore,
    config: HandlerConfig,
}

impl<'a> UsersHandler<'a> {
    pub fn new(store: &'a dyn UserStore, config: HandlerConfig) -> Self {
        Self { store, config }
    }

    /// Never fails: every error is turned into a response.
    pub fn handle_event(&self, event: Value) -> ApiGatewayResponse {
        let event = match ApiEvent::from_value(event) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(component = "handler", error = %error, "rejected malformed event");
                return bad_request_response(error.message());
            }
        };

        tracing::info!(
            component = "handler",
            method = %event.method,
            path = %event.path,
            "request received"
        );
        tracing::debug!(component = "handler", body = ?event.body, "request body");

        let Some(route) = Route::resolve(&event, self.config.base_path.as_deref()) else {
            tracing::info!(component = "handler", status_code = 400, "unsupported request");
            return bad_request_response(UNSUPPORTED_REQUEST_MESSAGE);
        };

        let route_name = route.name();
        let response = match self.dispatch(route, &event) {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(
                    component = "handler",
                    route = route_name,
                    error = %error,
                    "store operation failed"
                );
                internal_error_response()
            }
        };

        tracing::info!(
            component = "handler",
            route = route_name,
            status_code = response.status_code,
            "request completed"
        );
        response
    }

    fn dispatch(&self, route: Route, event: &ApiEvent) -> Result<ApiGatewayResponse, StoreError> {
        let response = match route {
            Route::CreateUser => match self.parse_input(event) {
                Ok(input) => json_response(201, &self.store.create(input)?),
                Err(response) => response,
            },
            Route::ListUsers => json_response(200, &self.store.list_all()?),
            Route::GetUser(id) => match self.store.get_by_id(&id)? {
                Some(user) => json_response(200, &user),
                None => not_found_response(),
            },
            Route::UpdateUser(id) => match self.parse_input(event) {
                Ok(input) => match self.store.update(&id, input)? {
                    Some(user) => json_response(200, &user),
                    None => not_found_response(),
                },
                Err(response) => response,
            },
            Route::DeleteUser(id) => match self.store.delete_by_id(&id)? {
                Deleted::Removed => empty_response(204),
                Deleted::NotFound => not_found_response(),
            },
        };
        Ok(response)
    }

    /// Only create and update read the body, so a stray body on any other
    /// route is ignored.
    fn parse_input(&self, event: &ApiEvent) -> Result<UserInput, ApiGatewayResponse> {
        let body = event.json_body().map_err(|error| {
            tracing::warn!(component = "handler", error = %error, "rejected malformed body");
            bad_request_response(MALFORMED_BODY_MESSAGE)
        })?;
        UserInput::from_body(body.as_ref(), self.config.email_policy)
            .map_err(|error| bad_request_response(error.message()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::memory_store::InMemoryUserStore;
    use crate::user::{User, UserId};

    struct FailingStore {
        calls: Mutex<usize>,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().expect("poisoned mutex")
        }

        fn fail<T>(&self) -> Result<T, StoreError> {
            *self.calls.lock().expect("poisoned mutex") += 1;
            Err(StoreError::unavailable("connection reset by peer at 10.0.0.7"))
        }
    }

    impl UserStore for FailingStore {
        fn create(&self, _input: UserInput) -> Result<User, StoreError> {
            self.fail()
        }

        fn get_by_id(&self, _id: &UserId) -> Result<Option<User>, StoreError> {
            self.fail()
        }

        fn list_all(&self) -> Result<Vec<User>, StoreError> {
            self.fail()
        }

        fn update(&self, _id: &UserId, _input: UserInput) -> Result<Option<User>, StoreError> {
            self.fail()
        }

        fn delete_by_id(&self, _id: &UserId) -> Result<Deleted, StoreError> {
            self.fail()
        }
    }

    #[test]
    fn store_failure_becomes_generic_internal_error() {
        let store = FailingStore::new();
        let handler = UsersHandler::new(&store, HandlerConfig::default());

        let response = handler.handle_event(json!({"httpMethod": "GET", "path": "/users"}));

        assert_eq!(response.status_code, 500);
        assert!(!response.body.contains("10.0.0.7"));
        assert_eq!(store.calls(), 1);
    }

    #[test]
    fn validation_failure_never_reaches_store() {
        let store = FailingStore::new();
        let handler = UsersHandler::new(&store, HandlerConfig::default());

        let response = handler.handle_event(json!({
            "httpMethod": "POST",
            "path": "/users",
            "body": "{\"email\":\"a@x.com\"}"
        }));

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body_json(),
            Some(json!({"error": "bad_request", "message": "Field 'name' is required"}))
        );
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn malformed_body_gets_fixed_message_without_parser_detail() {
        let store = FailingStore::new();
        let handler = UsersHandler::new(&store, HandlerConfig::default());

        let response = handler.handle_event(json!({
            "httpMethod": "POST",
            "path": "/users",
            "body": "{bad"
        }));

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body_json(),
            Some(json!({"error": "bad_request", "message": MALFORMED_BODY_MESSAGE}))
        );
        assert!(!response.body.contains("line 1"));
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn malformed_event_is_bad_request() {
        let store = InMemoryUserStore::new();
        let handler = UsersHandler::new(&store, HandlerConfig::default());

        let response = handler.handle_event(json!("not an event"));

        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn update_with_invalid_body_is_rejected_before_lookup() {
        let store = InMemoryUserStore::new();
        let handler = UsersHandler::new(&store, HandlerConfig::default());

        let response = handler.handle_event(json!({
            "httpMethod": "PUT",
            "path": "/users/1",
            "body": "[]"
        }));

        assert_eq!(response.status_code, 400);
    }
}
