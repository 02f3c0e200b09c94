use aws_config::SdkConfig;
use aws_sdk_codepipeline::Client;
use aws_sdk_codepipeline::types;
use tracing::debug;

use crate::aws::sdk_error_detail;
use crate::error::{ErrorKind, InvalidatorResult};
use crate::invalidator_error;
use crate::pipeline::JobResultReporter;
use crate::types::{FailureDetails, FailureType, JobId};

/// [`JobResultReporter`] backed by the CodePipeline job result APIs.
#[derive(Debug, Clone)]
pub struct CodePipelineClient {
    client: Client,
}

impl CodePipelineClient {
    /// Creates a client from the process-wide SDK configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

impl From<FailureType> for types::FailureType {
    fn from(value: FailureType) -> Self {
        match value {
            FailureType::JobFailed => types::FailureType::JobFailed,
        }
    }
}

impl JobResultReporter for CodePipelineClient {
    async fn put_job_success_result(&self, job_id: &JobId) -> InvalidatorResult<()> {
        debug!(%job_id, "sending job success result");

        self.client
            .put_job_success_result()
            .job_id(job_id.as_str())
            .send()
            .await
            .map_err(|err| {
                invalidator_error!(
                    ErrorKind::ResultReportFailed,
                    "CodePipeline job success report failed",
                    sdk_error_detail(&err)
                )
            })?;

        Ok(())
    }

    async fn put_job_failure_result(
        &self,
        job_id: &JobId,
        failure_details: FailureDetails,
    ) -> InvalidatorResult<()> {
        debug!(
            %job_id,
            external_execution_id = failure_details.external_execution_id,
            "sending job failure result"
        );

        let details = types::FailureDetails::builder()
            .r#type(failure_details.failure_type.into())
            .message(failure_details.message)
            .external_execution_id(failure_details.external_execution_id)
            .build()
            .map_err(|err| {
                invalidator_error!(
                    ErrorKind::ResultReportFailed,
                    "Invalid CodePipeline failure details",
                    err
                )
            })?;

        self.client
            .put_job_failure_result()
            .job_id(job_id.as_str())
            .failure_details(details)
            .send()
            .await
            .map_err(|err| {
                invalidator_error!(
                    ErrorKind::ResultReportFailed,
                    "CodePipeline job failure report failed",
                    sdk_error_detail(&err)
                )
            })?;

        Ok(())
    }
}
