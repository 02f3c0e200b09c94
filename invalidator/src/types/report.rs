use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::InvalidatorError;

/// Longest failure message CodePipeline accepts.
pub const MAX_FAILURE_MESSAGE_CHARS: usize = 5000;

/// Prefix of the synthetic execution id attached to failure reports.
const EXTERNAL_EXECUTION_ID_PREFIX: &str = "lambda";

/// Failure category shown for a failed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    JobFailed,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::JobFailed => f.write_str("JobFailed"),
        }
    }
}

/// Details attached to a failure report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetails {
    pub message: String,
    pub failure_type: FailureType,
    pub external_execution_id: String,
}

impl FailureDetails {
    /// Builds the failure details describing `err`.
    ///
    /// The message is the error's own text, cut to what CodePipeline accepts.
    pub fn from_error(err: &InvalidatorError, now: DateTime<Utc>) -> Self {
        let message = err
            .message()
            .chars()
            .take(MAX_FAILURE_MESSAGE_CHARS)
            .collect();

        Self {
            message,
            failure_type: FailureType::JobFailed,
            external_execution_id: format!("{EXTERNAL_EXECUTION_ID_PREFIX}-{}", now.timestamp()),
        }
    }
}
