use lambda_runtime::Error;
use tracing_subscriber::EnvFilter;

/// Installs a JSON log subscriber filtered by `RUST_LOG` (default `info`).
/// CloudWatch stamps every line, so timestamps and ANSI colours are dropped.
pub fn init_tracing() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_current_span(true)
        .without_time()
        .with_ansi(false)
        .try_init()
        .map_err(|error| Error::from(format!("failed to install tracing subscriber: {error}")))
}
