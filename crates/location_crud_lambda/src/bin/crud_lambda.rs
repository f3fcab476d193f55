use lambda_runtime::{service_fn, Error, LambdaEvent};
use location_crud_lambda::handlers::invocation::{
    handle_crud_invocation_with_http_runtime, ApiGatewayResponse,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    tracing::info!(
        component = "crud_lambda",
        event = "invocation_received",
        request_id = %event.context.request_id,
    );

    // The reqwest blocking client owns its own runtime and must not be
    // created or dropped on an async worker thread.
    tokio::task::spawn_blocking(|| {
        handle_crud_invocation_with_http_runtime(|name| std::env::var(name).ok())
    })
    .await
    .map_err(|error| Error::from(format!("crud invocation task failed: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_current_span(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    lambda_runtime::run(service_fn(handle_request)).await
}
