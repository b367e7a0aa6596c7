use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use users_api_core::EmailPolicy;
use users_api_lambda::adapters::dynamo_store::DynamoUserStore;
use users_api_lambda::config::LambdaConfig;
use users_api_lambda::handlers::users::handle_users_request;
use users_api_lambda::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;

    let config = LambdaConfig::from_env();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&aws_config);
    let store = DynamoUserStore::new(client, &config.table_name);
    let handler_config = config.handler_config(EmailPolicy::Required);

    tracing::info!(
        component = "users_lambda",
        table_name = store.table_name(),
        base_path = ?config.base_path,
        "starting dynamodb-backed users handler"
    );

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handle_users_request(event, &store, &handler_config)
    }))
    .await
}
