//! Defines the workflow engine seam: the single capability the
//! trigger needs from the outside world.

use crate::error::Result;
use crate::naming::ExecutionName;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A request to start a workflow execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub state_machine_arn: String,
    pub name: ExecutionName,
    /// The serialized execution input.
    pub input: String,
}

/// The engine's acknowledgment of a started execution. It is logged,
/// never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStarted {
    pub execution_arn: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
}

/// Something able to start workflow executions.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    async fn start_execution(&self, request: StartRequest) -> Result<ExecutionStarted>;
}
