//! Defines the read-only application state and the handling of a
//! single upload event.

use crate::conf::Settings;
use crate::engine::{StartRequest, WorkflowEngine};
use crate::error::{Result, TriggerError};
use crate::event::UploadEvent;
use crate::naming::{validate_prefix, ExecutionName};
use crate::trigger::Trigger;
use anyhow::anyhow;
use envy::from_env;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

/// The message returned after every successful start.
pub const STARTED_MESSAGE: &str = "Step Function execution started successfully.";

/// Shape of a state machine ARN, optionally qualified by a version or
/// alias. Names may hold any character except whitespace, control
/// characters and the punctuation Step Functions reserves.
static STATE_MACHINE_ARN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r##"^arn:aws[a-zA-Z-]*:states:[a-z0-9-]+:\d{12}:stateMachine:[^\s\p{Cc}<>{}\[\]?*"#%\\\^|\~`$\&,;:/]{1,80}(:[A-Za-z0-9_.-]+)?$"##,
    )
    .unwrap()
});

/// What the function answers when an execution was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub status_code: u16,
    pub body: String,
}

impl Acknowledgment {
    fn started() -> Self {
        Acknowledgment {
            status_code: 200,
            body: String::from(STARTED_MESSAGE),
        }
    }
}

/// An App is an initialized application state, derived from
/// settings. Settings are validated once, when building it.
#[derive(Debug)]
pub struct App {
    /// The original settings.
    pub settings: Settings,
}

impl App {
    /// Initialize an App instance given a settings struct. Consumes
    /// the settings struct.
    pub fn new(settings: Settings) -> Result<Self> {
        if settings.state_machine_arn.trim().is_empty() {
            return Err(TriggerError::Configuration(String::from(
                "the state machine ARN is empty",
            )));
        }
        if !STATE_MACHINE_ARN_RE.is_match(&settings.state_machine_arn) {
            return Err(TriggerError::Configuration(format!(
                "{:?} is not a state machine ARN",
                settings.state_machine_arn
            )));
        }
        validate_prefix(&settings.execution_name_prefix)?;
        Ok(App { settings })
    }

    /// Handle a raw invocation payload: decode it as an upload event
    /// and start one execution for its first record.
    #[instrument(skip_all)]
    pub async fn handle<E>(&self, raw: &Value, engine: &E) -> Result<Acknowledgment>
    where
        E: WorkflowEngine + ?Sized,
    {
        let event = UploadEvent::from_value(raw)?;
        let trigger = Trigger::from_event(&event)?;
        let input = trigger.to_input()?;
        info!("Input Data: {}", input);
        info!("Event: {}", raw);

        let request = StartRequest {
            state_machine_arn: self.settings.state_machine_arn.clone(),
            name: ExecutionName::generate(&self.settings.execution_name_prefix),
            input,
        };
        let name = request.name.clone();
        let started = engine.start_execution(request).await?;
        info!(
            "Step Function Execution Response: {}",
            serde_json::to_string(&started)?
        );
        info!(execution = %name, "Started execution");

        Ok(Acknowledgment::started())
    }

    /// Handle an already decoded event.
    pub async fn handle_event<E>(&self, event: &UploadEvent, engine: &E) -> Result<Acknowledgment>
    where
        E: WorkflowEngine + ?Sized,
    {
        let raw = serde_json::to_value(event)?;
        self.handle(&raw, engine).await
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> anyhow::Result<()> {
    let settings = from_env()?;
    let app = App::new(settings)?;
    CURRENT
        .set(app)
        .map_err(|_| anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}
