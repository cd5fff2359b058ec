use anyhow::{anyhow, Context, Result};
use lambda_runtime::{run, service_fn, LambdaEvent};
use s3_sfn_trigger::app::{self, Acknowledgment};
use s3_sfn_trigger::client;
use serde_json::Value;

/// Start a workflow execution for the first S3 record in the event
async fn function_handler(event: LambdaEvent<Value>) -> Result<Acknowledgment> {
    app::current()
        .handle(&event.payload, client::current())
        .await
        .with_context(|| format!("Failed to handle event {}", &event.payload))
}

/// Run an AWS Lambda function that listens to S3 upload events and
/// starts an execution of the configured state machine for each one,
/// passing the bucket and key of the uploaded object as input.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init().await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
