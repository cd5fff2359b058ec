//! Defines configuration as read from the environment.

use serde::Deserialize;

/// Default `execution_name_prefix` value.
fn default_execution_name_prefix() -> String {
    String::from("Execution")
}

/// The trigger starts an execution of a single state machine for
/// each upload event it receives. The configuration must be given as
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "EnvSettings")]
pub struct Settings {
    /// The ARN of the state machine to start.
    pub state_machine_arn: String,

    /// The literal prefix of every generated execution name. Names
    /// take the form `<prefix>-<unix timestamp>-<uuid>`, and must fit
    /// in the 80 characters allowed by the workflow engine, which
    /// leaves room for a prefix of up to 32 characters.
    pub execution_name_prefix: String,
}

/// Settings as found in the environment, before resolving which
/// variable names the state machine.
#[derive(Deserialize)]
struct EnvSettings {
    /// The ARN of the state machine to start.
    #[serde(default)]
    state_machine_arn: Option<String>,

    /// Short name for `state_machine_arn`. Ignored when both are
    /// set.
    #[serde(default)]
    sm_arn: Option<String>,

    #[serde(default = "default_execution_name_prefix")]
    execution_name_prefix: String,
}

impl TryFrom<EnvSettings> for Settings {
    type Error = String;

    fn try_from(env: EnvSettings) -> Result<Self, Self::Error> {
        let state_machine_arn = env
            .state_machine_arn
            .or(env.sm_arn)
            .ok_or_else(|| String::from("STATE_MACHINE_ARN (or SM_ARN) is required"))?;
        Ok(Settings {
            state_machine_arn,
            execution_name_prefix: env.execution_name_prefix,
        })
    }
}

impl Settings {
    /// Builds settings targeting the given state machine, with
    /// defaults for everything else.
    pub fn new(state_machine_arn: impl Into<String>) -> Self {
        Settings {
            state_machine_arn: state_machine_arn.into(),
            execution_name_prefix: default_execution_name_prefix(),
        }
    }
}
