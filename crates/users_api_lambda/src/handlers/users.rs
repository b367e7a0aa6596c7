use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use users_api_core::{ApiGatewayResponse, HandlerConfig, UserStore, UsersHandler};

pub async fn handle_users_request(
    event: LambdaEvent<Value>,
    store: &dyn UserStore,
    config: &HandlerConfig,
) -> Result<ApiGatewayResponse, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    let handler = UsersHandler::new(store, config.clone());
    Ok(span.in_scope(|| handler.handle_event(event.payload)))
}
