use chrono::Utc;
use tracing::{info, warn};

use crate::error::{InvalidatorError, InvalidatorResult};
use crate::pipeline::JobResultReporter;
use crate::types::{FailureDetails, JobId};

/// Reports the outcome of a job to the pipeline.
#[derive(Debug, Clone)]
pub struct ResultReporter<R> {
    reporter: R,
    always_report_success: bool,
}

impl<R> ResultReporter<R>
where
    R: JobResultReporter,
{
    /// Creates a result reporter.
    ///
    /// With `always_report_success` set, a failure report is followed by a success report for
    /// the same job. Otherwise exactly one of the two is sent.
    pub fn new(reporter: R, always_report_success: bool) -> Self {
        Self {
            reporter,
            always_report_success,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Reports the job as failed with `error` when one is given, and as succeeded otherwise.
    ///
    /// The failure report carries the error's message and a time-derived external execution id.
    /// A failing report call stops further reporting and is returned to the caller.
    pub async fn report(
        &self,
        job_id: &JobId,
        error: Option<&InvalidatorError>,
    ) -> InvalidatorResult<()> {
        if let Some(err) = error {
            let failure_details = FailureDetails::from_error(err, Utc::now());
            info!(
                %job_id,
                external_execution_id = failure_details.external_execution_id,
                "reporting job failure"
            );
            self.reporter
                .put_job_failure_result(job_id, failure_details)
                .await?;

            if !self.always_report_success {
                return Ok(());
            }

            warn!(%job_id, "reporting job success after its failure report");
        }

        info!(%job_id, "reporting job success");
        self.reporter.put_job_success_result(job_id).await
    }
}
