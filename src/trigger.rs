//! Defines a _trigger_, the input handed over to the workflow
//! execution. The trigger is built from the S3 event.

use crate::error::Result;
use crate::event::UploadEvent;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The input of a workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// The bucket the file was uploaded to.
    pub bucket: String,

    /// The key of the uploaded object, verbatim.
    #[serde(rename = "fileName")]
    pub file_name: String,
}

impl Trigger {
    /// Builds the trigger from the first record inside an S3 event.
    /// Further records are ignored.
    #[instrument(skip_all)]
    pub fn from_event(event: &UploadEvent) -> Result<Self> {
        let record = event.first_record()?;
        Ok(Trigger {
            bucket: record.s3.bucket.name,
            file_name: record.s3.object.key,
        })
    }

    /// Serialize the trigger as the execution's input document.
    pub fn to_input(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
