//! Generation of execution names.

use crate::error::{Result, TriggerError};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use uuid::Uuid;

/// The longest name the workflow engine accepts.
pub const MAX_NAME_LENGTH: usize = 80;

/// Characters a name may be made of.
static NAME_CHARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9_-]+$").unwrap());

/// Length taken by `-<timestamp>-<uuid>` in a generated name, with
/// the timestamp at its widest.
const SUFFIX_LENGTH: usize = 1 + 10 + 1 + 36;

/// A unique name identifying a workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExecutionName(String);

impl ExecutionName {
    /// Generate a fresh name out of the current time and a random
    /// identifier.
    pub fn generate(prefix: &str) -> Self {
        Self::compose(prefix, Utc::now(), Uuid::new_v4())
    }

    /// Build a name out of its parts.
    pub fn compose(prefix: &str, time: DateTime<Utc>, id: Uuid) -> Self {
        ExecutionName(format!("{}-{}-{}", prefix, time.timestamp(), id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ExecutionName> for String {
    fn from(name: ExecutionName) -> String {
        name.0
    }
}

/// Check that names generated with the given prefix will be accepted
/// by the workflow engine.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if !NAME_CHARS_RE.is_match(prefix) {
        return Err(TriggerError::Configuration(format!(
            "execution name prefix {:?} must be non-empty and contain only \
             alphanumerics, hyphens or underscores",
            prefix
        )));
    }
    if prefix.len() + SUFFIX_LENGTH > MAX_NAME_LENGTH {
        return Err(TriggerError::Configuration(format!(
            "execution name prefix {:?} is too long; at most {} characters are allowed",
            prefix,
            MAX_NAME_LENGTH - SUFFIX_LENGTH
        )));
    }
    Ok(())
}
