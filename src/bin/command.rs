use anyhow::{Context, Result};
use s3_sfn_trigger::event::UploadEvent;
use s3_sfn_trigger::{app, client};
use std::env::var;

/// Start a workflow execution for an object given through the
/// `BUCKET` and `KEY` environment variables, as if it had just been
/// uploaded.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init().await?;

    let bucket = var("BUCKET").context("BUCKET is required")?;
    let key = var("KEY").context("KEY is required")?;
    let event = UploadEvent::single(bucket, key);

    let acknowledgment = app::current()
        .handle_event(&event, client::current())
        .await
        .with_context(|| format!("Failed to handle event {:?}", &event))?;
    println!("{}", serde_json::to_string(&acknowledgment)?);

    Ok(())
}
