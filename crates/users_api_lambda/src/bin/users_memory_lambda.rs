//! In-memory users handler. Records live only as long as this instance;
//! concurrent instances do not see each other's users.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use users_api_core::{EmailPolicy, InMemoryUserStore};
use users_api_lambda::config::LambdaConfig;
use users_api_lambda::handlers::users::handle_users_request;
use users_api_lambda::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;

    let config = LambdaConfig::from_env();
    let store = InMemoryUserStore::new();
    let handler_config = config.handler_config(EmailPolicy::Optional);

    tracing::info!(
        component = "users_memory_lambda",
        base_path = ?config.base_path,
        "starting in-memory users handler"
    );

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handle_users_request(event, &store, &handler_config)
    }))
    .await
}
