//! Defines the subset of the S3 event notification that the trigger
//! reads. Everything else in the notification is ignored, including
//! every record past the first one.

use crate::error::{Result, TriggerError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// An S3 event notification, as delivered to the function. Records
/// are kept undecoded until one of them is picked.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadEvent {
    #[serde(rename = "Records")]
    pub records: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct S3Object {
    pub key: String,
}

impl UploadEvent {
    /// Decode an event out of a raw JSON payload.
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::deserialize(raw).map_err(|e| TriggerError::MalformedEvent(e.to_string()))
    }

    /// Build a single-record event for the given bucket and key.
    pub fn single(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        let (bucket, key): (String, String) = (bucket.into(), key.into());
        UploadEvent {
            records: vec![json!({
                "s3": {
                    "bucket": {"name": bucket},
                    "object": {"key": key},
                }
            })],
        }
    }

    /// The record the trigger acts upon. Only the first one is ever
    /// honored, and only the first one is decoded.
    pub fn first_record(&self) -> Result<UploadRecord> {
        let first = self
            .records
            .first()
            .ok_or_else(|| TriggerError::MalformedEvent(String::from("event has no records")))?;
        UploadRecord::deserialize(first)
            .map_err(|e| TriggerError::MalformedEvent(format!("first record: {}", e)))
    }
}
