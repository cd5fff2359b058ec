//! Defines the global Step Functions client.

use crate::engine::{ExecutionStarted, StartRequest, WorkflowEngine};
use crate::error::{Result, TriggerError};
use anyhow::anyhow;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_sfn::operation::start_execution::StartExecutionOutput;
use aws_sdk_sfn::Client;
use aws_smithy_types_convert::date_time::DateTimeExt;
use once_cell::sync::OnceCell;
use std::env;
use tracing::{instrument, warn};

impl From<&StartExecutionOutput> for ExecutionStarted {
    fn from(output: &StartExecutionOutput) -> Self {
        let start_date = output.start_date().and_then(|date| {
            date.to_chrono_utc()
                .map_err(|e| warn!("Couldn't convert execution start date {:?}: {:?}", date, e))
                .ok()
        });
        ExecutionStarted {
            execution_arn: output.execution_arn().map(String::from),
            start_date,
        }
    }
}

/// Wrap an error returned by Step Functions for the given request.
fn start_failure(request: &StartRequest, error: aws_sdk_sfn::Error) -> TriggerError {
    TriggerError::StartExecution {
        state_machine_arn: request.state_machine_arn.clone(),
        name: request.name.to_string(),
        source: Box::new(error),
    }
}

#[async_trait]
impl WorkflowEngine for Client {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn start_execution(&self, request: StartRequest) -> Result<ExecutionStarted> {
        let output = Client::start_execution(self)
            .state_machine_arn(&request.state_machine_arn)
            .name(request.name.as_str())
            .input(&request.input)
            .send()
            .await
            .map_err(|e| start_failure(&request, e.into()))?;
        Ok(ExecutionStarted::from(&output))
    }
}

/// Normalize an endpoint override into a full URL.
fn endpoint_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        String::from(raw)
    } else {
        format!("https://{}", raw)
    }
}

/// Global Step Functions client instance.
static CURRENT: OnceCell<Client> = OnceCell::new();

/// Initialize the global Step Functions client.
pub async fn init() -> anyhow::Result<()> {
    let endpoint_url_var = env::var("AWS_ENDPOINT_URL");
    let sfn_config = if let Ok(endpoint_url_value) = endpoint_url_var {
        aws_config::from_env()
            .endpoint_url(endpoint_url(&endpoint_url_value))
            .region(RegionProviderChain::default_provider().or_else("us-east-1"))
            .load()
    } else {
        aws_config::from_env().load()
    }
    .await;
    let client = Client::new(&sfn_config);
    CURRENT
        .set(client)
        .map_err(|_| anyhow!("client::CURRENT was already initialized"))
}

/// Get the current Step Functions client instance, or panic if it
/// hasn't been initialized.
pub fn current() -> &'static Client {
    CURRENT.get().expect("client is not initialized")
}
