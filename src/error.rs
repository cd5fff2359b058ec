//! Defines the failures a trigger invocation may end with. None of
//! them is recovered from locally: they are all surfaced to the
//! invoking platform as a failed invocation.

use thiserror::Error;

/// Boxed error produced by a workflow engine implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum TriggerError {
    /// The inbound event lacks the record, bucket or key it should
    /// carry.
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// The settings can't be used to start executions.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The workflow engine refused or failed to start the execution.
    #[error("failed to start execution {name:?} of {state_machine_arn:?}")]
    StartExecution {
        state_machine_arn: String,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to serialize execution input")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = TriggerError> = std::result::Result<T, E>;
