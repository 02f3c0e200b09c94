use chrono::Utc;
use invalidator_config::shared::InvalidatorConfig;
use tracing::{error, info};

use crate::cdn::InvalidationClient;
use crate::error::{ErrorKind, InvalidatorError, InvalidatorResult};
use crate::invalidator_error;
use crate::pipeline::{JobResultReporter, ResultReporter};
use crate::types::{CodePipelineJobEvent, Invalidation, InvalidationRequest};

/// Result of one job, after it has been reported to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The invalidation was created and the job reported as succeeded.
    Invalidated(Invalidation),
    /// The invalidation failed and the job was reported as failed.
    Failed(InvalidatorError),
}

/// Invalidates the whole distribution for each pipeline job and reports the outcome.
#[derive(Debug)]
pub struct InvalidationHandler<C, R> {
    cdn: C,
    result_reporter: ResultReporter<R>,
    distribution_id: Option<String>,
}

impl<C, R> InvalidationHandler<C, R>
where
    C: InvalidationClient,
    R: JobResultReporter,
{
    pub fn new(cdn: C, reporter: R, config: &InvalidatorConfig) -> Self {
        Self {
            cdn,
            result_reporter: ResultReporter::new(reporter, config.always_report_success),
            distribution_id: config.distribution_id().map(str::to_string),
        }
    }

    pub fn cdn(&self) -> &C {
        &self.cdn
    }

    pub fn reporter(&self) -> &R {
        self.result_reporter.reporter()
    }

    /// Handles one job event.
    ///
    /// An invalidation failure is not an error of this function: it is reported to the pipeline
    /// and returned as [`JobOutcome::Failed`]. Errors are returned only when the job cannot be
    /// reported at all, either because the event has no usable job id or because the report
    /// call itself failed.
    pub async fn handle_job(&self, event: &CodePipelineJobEvent) -> InvalidatorResult<JobOutcome> {
        let job_id = event.job_id()?;

        match self.invalidate().await {
            Ok(invalidation) => {
                info!(
                    %job_id,
                    invalidation_id = invalidation.id,
                    status = invalidation.status.as_deref(),
                    "Invalidation ID: {}",
                    invalidation.id
                );
                self.result_reporter.report(job_id, None).await?;

                Ok(JobOutcome::Invalidated(invalidation))
            }
            Err(err) => {
                error!(%job_id, error = %err, "distribution invalidation failed");
                self.result_reporter.report(job_id, Some(&err)).await?;

                Ok(JobOutcome::Failed(err))
            }
        }
    }

    async fn invalidate(&self) -> InvalidatorResult<Invalidation> {
        let Some(distribution_id) = &self.distribution_id else {
            return Err(invalidator_error!(
                ErrorKind::InvalidationRequestFailed,
                "No distribution configured",
                "DISTRIBUTION_ID is not set"
            ));
        };

        let request = InvalidationRequest::all_paths(distribution_id.as_str(), Utc::now());
        self.cdn.create_invalidation(request).await
    }
}
