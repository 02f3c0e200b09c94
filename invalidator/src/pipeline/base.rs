use std::future::Future;

use crate::error::InvalidatorResult;
use crate::types::{FailureDetails, JobId};

/// Orchestrator receiving the result of a pipeline job.
pub trait JobResultReporter {
    fn put_job_success_result(
        &self,
        job_id: &JobId,
    ) -> impl Future<Output = InvalidatorResult<()>> + Send;

    fn put_job_failure_result(
        &self,
        job_id: &JobId,
        failure_details: FailureDetails,
    ) -> impl Future<Output = InvalidatorResult<()>> + Send;
}
