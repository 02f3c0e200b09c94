use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{ErrorKind, InvalidatorResult};
use crate::invalidator_error;
use crate::pipeline::JobResultReporter;
use crate::types::{FailureDetails, JobId};

/// A report received by [`MemoryJobResultReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobReport {
    Success {
        job_id: JobId,
    },
    Failure {
        job_id: JobId,
        failure_details: FailureDetails,
    },
}

#[derive(Debug, Default)]
struct Inner {
    reports: Vec<JobReport>,
    fail_reports: bool,
}

/// In-memory [`JobResultReporter`] recording every report in call order.
#[derive(Debug, Clone, Default)]
pub struct MemoryJobResultReporter {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryJobResultReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following report call fail without being recorded.
    pub async fn fail_reports(&self) {
        self.inner.lock().await.fail_reports = true;
    }

    pub async fn reports(&self) -> Vec<JobReport> {
        self.inner.lock().await.reports.clone()
    }

    async fn record(&self, report: JobReport) -> InvalidatorResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.fail_reports {
            return Err(invalidator_error!(
                ErrorKind::ResultReportFailed,
                "CodePipeline request failed",
                "service unavailable"
            ));
        }

        inner.reports.push(report);

        Ok(())
    }
}

impl JobResultReporter for MemoryJobResultReporter {
    async fn put_job_success_result(&self, job_id: &JobId) -> InvalidatorResult<()> {
        self.record(JobReport::Success {
            job_id: job_id.clone(),
        })
        .await
    }

    async fn put_job_failure_result(
        &self,
        job_id: &JobId,
        failure_details: FailureDetails,
    ) -> InvalidatorResult<()> {
        self.record(JobReport::Failure {
            job_id: job_id.clone(),
            failure_details,
        })
        .await
    }
}
