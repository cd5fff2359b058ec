use assert_matches::assert_matches;
use async_trait::async_trait;
use regex::Regex;
use s3_sfn_trigger::app::{Acknowledgment, App};
use s3_sfn_trigger::conf::Settings;
use s3_sfn_trigger::engine::{ExecutionStarted, StartRequest, WorkflowEngine};
use s3_sfn_trigger::error::{Result, TriggerError};
use s3_sfn_trigger::event::UploadEvent;
use serde_json::{json, Value};
use std::io;
use std::sync::Mutex;

// A concrete ARN: placeholders such as `arn:aws:states:...` are
// rejected when the app is built.
const ARN: &str = "arn:aws:states:eu-central-1:000000000000:stateMachine:MyFlow";

/// Engine double that records every request and acknowledges it.
#[derive(Default)]
struct RecordingEngine {
    requests: Mutex<Vec<StartRequest>>,
}

impl RecordingEngine {
    fn requests(&self) -> Vec<StartRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowEngine for RecordingEngine {
    async fn start_execution(&self, request: StartRequest) -> Result<ExecutionStarted> {
        let execution_arn = format!(
            "arn:aws:states:eu-central-1:000000000000:execution:MyFlow:{}",
            request.name
        );
        self.requests.lock().unwrap().push(request);
        Ok(ExecutionStarted {
            execution_arn: Some(execution_arn),
            start_date: None,
        })
    }
}

/// Engine double that always fails, as an unreachable engine would.
#[derive(Default)]
struct FailingEngine {
    calls: Mutex<usize>,
}

#[async_trait]
impl WorkflowEngine for FailingEngine {
    async fn start_execution(&self, request: StartRequest) -> Result<ExecutionStarted> {
        *self.calls.lock().unwrap() += 1;
        Err(TriggerError::StartExecution {
            state_machine_arn: request.state_machine_arn,
            name: request.name.to_string(),
            source: Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "engine unreachable",
            )),
        })
    }
}

fn app() -> App {
    App::new(Settings::new(ARN)).unwrap()
}

fn input_of(request: &StartRequest) -> Value {
    serde_json::from_str(&request.input).unwrap()
}

#[tokio::test]
async fn starts_one_execution_for_an_upload() {
    let engine = RecordingEngine::default();
    let event = json!({
        "Records": [{"s3": {"bucket": {"name": "my-bucket"}, "object": {"key": "data/file.csv"}}}]
    });

    let acknowledgment = app().handle(&event, &engine).await.unwrap();

    assert_eq!(
        acknowledgment,
        Acknowledgment {
            status_code: 200,
            body: String::from("Step Function execution started successfully."),
        }
    );
    let requests = engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].state_machine_arn, ARN);
    assert_eq!(
        input_of(&requests[0]),
        json!({"bucket": "my-bucket", "fileName": "data/file.csv"})
    );
}

#[tokio::test]
async fn names_executions_with_time_and_random_id() {
    let engine = RecordingEngine::default();
    let app = app();
    let event = UploadEvent::single("my-bucket", "data/file.csv");

    app.handle_event(&event, &engine).await.unwrap();
    app.handle_event(&event, &engine).await.unwrap();

    let pattern = Regex::new(
        "^Execution-[0-9]+-[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    )
    .unwrap();
    let requests = engine.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(pattern.is_match(request.name.as_str()), "{}", request.name);
    }
    assert_ne!(requests[0].name, requests[1].name);
}

#[tokio::test]
async fn uses_only_the_first_record() {
    let engine = RecordingEngine::default();
    let event = json!({
        "Records": [
            {"s3": {"bucket": {"name": "first-bucket"}, "object": {"key": "first.csv"}}},
            {"s3": {"bucket": {"name": "second-bucket"}, "object": {"key": "second.csv"}}}
        ]
    });

    app().handle(&event, &engine).await.unwrap();

    let requests = engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        input_of(&requests[0]),
        json!({"bucket": "first-bucket", "fileName": "first.csv"})
    );
}

#[tokio::test]
async fn malformed_trailing_records_are_ignored() {
    let engine = RecordingEngine::default();
    let event = json!({
        "Records": [
            {"s3": {"bucket": {"name": "my-bucket"}, "object": {"key": "data/file.csv"}}},
            {"eventSource": "aws:sqs", "body": "{}"},
            {"s3": {"bucket": {"name": "other-bucket"}, "object": {}}}
        ]
    });

    let acknowledgment = app().handle(&event, &engine).await.unwrap();

    assert_eq!(acknowledgment.status_code, 200);
    let requests = engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        input_of(&requests[0]),
        json!({"bucket": "my-bucket", "fileName": "data/file.csv"})
    );
}

#[tokio::test]
async fn empty_records_never_reach_the_engine() {
    let engine = RecordingEngine::default();

    let result = app().handle(&json!({"Records": []}), &engine).await;

    assert_matches!(result, Err(TriggerError::MalformedEvent(_)));
    assert!(engine.requests().is_empty());
}

#[tokio::test]
async fn incomplete_records_never_reach_the_engine() {
    let engine = RecordingEngine::default();
    let event = json!({"Records": [{"s3": {"bucket": {"name": "my-bucket"}}}]});

    let result = app().handle(&event, &engine).await;

    assert_matches!(result, Err(TriggerError::MalformedEvent(_)));
    assert!(engine.requests().is_empty());
}

#[tokio::test]
async fn engine_failures_propagate() {
    let engine = FailingEngine::default();
    let event = UploadEvent::single("my-bucket", "data/file.csv");

    let result = app().handle_event(&event, &engine).await;

    assert_matches!(
        result,
        Err(TriggerError::StartExecution { ref state_machine_arn, .. }) if state_machine_arn == ARN
    );
    assert_eq!(*engine.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn honors_the_configured_prefix() {
    let engine = RecordingEngine::default();
    let mut settings = Settings::new(ARN);
    settings.execution_name_prefix = String::from("Ingest");
    let app = App::new(settings).unwrap();

    app.handle_event(&UploadEvent::single("b", "k"), &engine)
        .await
        .unwrap();

    assert!(engine.requests()[0].name.as_str().starts_with("Ingest-"));
}
