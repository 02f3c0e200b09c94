use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bail;
use crate::error::{ErrorKind, InvalidatorResult};

/// Identifier CodePipeline assigns to a job, used to correlate the result report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Payload of a Lambda invocation issued by a CodePipeline invoke action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodePipelineJobEvent {
    #[serde(rename = "CodePipeline.job")]
    pub job: CodePipelineJob,
}

/// The job part of a [`CodePipelineJobEvent`].
///
/// Only the id is interpreted. The remaining fields are kept so that they show up in debug logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePipelineJob {
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CodePipelineJobEvent {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job: CodePipelineJob {
                id: JobId::new(job_id),
                account_id: None,
                data: None,
            },
        }
    }

    /// Returns the id of the job to report on.
    ///
    /// A blank id cannot be reported on, so it is rejected rather than sent to CodePipeline.
    pub fn job_id(&self) -> InvalidatorResult<&JobId> {
        if self.job.id.as_str().trim().is_empty() {
            bail!(ErrorKind::InvalidEvent, "CodePipeline job id is empty");
        }

        Ok(&self.job.id)
    }
}
