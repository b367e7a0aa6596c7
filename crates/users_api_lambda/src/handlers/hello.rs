use lambda_runtime::{Error, LambdaEvent};
use serde_json::{json, Value};

pub const HELLO_MESSAGE: &str = "Hello from Lambda!";

/// Liveness check: answers every event with a fixed greeting.
pub async fn handle_hello(_event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(json!({
        "statusCode": 200,
        "body": HELLO_MESSAGE,
    }))
}
