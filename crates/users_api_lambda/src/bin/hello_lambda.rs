use lambda_runtime::{service_fn, Error};
use users_api_lambda::handlers::hello::handle_hello;
use users_api_lambda::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;
    lambda_runtime::run(service_fn(handle_hello)).await
}
