//! Status poller
//!
//! Checks the status of every active job once per pass and partitions the
//! active set into jobs that keep running and jobs that reached a terminal
//! outcome. Each job is checked in its own task; status queries are gated by
//! a semaphore so at most `max_status_checks` are in flight at once.

use reana_core::domain::job::{JobId, JobOutcome, RemoteJobStatus, SubmittedJob};
use reana_core::domain::progress::ProgressBucket;
use reana_core::domain::workflow::RunStatus;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::WorkflowError;
use crate::repository::JobControllerRepository;
use crate::service::StatusPublisher;

/// Result of one polling pass
#[derive(Debug, Clone)]
pub struct PollReport {
    /// Jobs to check again on the next pass, in the order they were given
    pub active: Vec<SubmittedJob>,
    pub succeeded: Vec<SubmittedJob>,
    pub failed: Vec<SubmittedJob>,
    /// Delay the host should wait before the next pass
    pub next_sleep: Duration,
}

impl PollReport {
    fn new(next_sleep: Duration) -> Self {
        Self {
            active: Vec::new(),
            succeeded: Vec::new(),
            failed: Vec::new(),
            next_sleep,
        }
    }

    fn push(&mut self, job: SubmittedJob, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Success => self.succeeded.push(job),
            JobOutcome::Failure => self.failed.push(job),
            JobOutcome::Pending => self.active.push(job),
        }
    }

    pub fn is_done(&self) -> bool {
        self.active.is_empty()
    }
}

/// Polls the job controller for the status of active jobs
pub struct StatusPoller {
    controller: Arc<dyn JobControllerRepository>,
    publisher: Arc<StatusPublisher>,
    semaphore: Arc<Semaphore>,
    poll_interval: Duration,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(
        config: &Config,
        controller: Arc<dyn JobControllerRepository>,
        publisher: Arc<StatusPublisher>,
    ) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_status_checks));
        Self {
            controller,
            publisher,
            semaphore,
            poll_interval: config.poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Performs one polling pass over `active_jobs`
    ///
    /// Every job ends up in exactly one bucket of the returned report. Jobs
    /// reaching a terminal outcome are announced on the status channel from
    /// within their own check.
    pub async fn check_active_jobs(&self, active_jobs: Vec<SubmittedJob>) -> PollReport {
        debug!("Checking status of {} jobs", active_jobs.len());

        let mut handles = Vec::with_capacity(active_jobs.len());

        for active_job in active_jobs {
            let controller = Arc::clone(&self.controller);
            let publisher = Arc::clone(&self.publisher);
            let semaphore = Arc::clone(&self.semaphore);
            let fallback = active_job.clone();

            let handle = tokio::spawn(async move {
                let outcome =
                    Self::check_job(controller.as_ref(), &publisher, semaphore, &active_job).await;
                (active_job, outcome)
            });
            handles.push((fallback, handle));
        }

        let mut report = PollReport::new(self.poll_interval);

        for (fallback, handle) in handles {
            match handle.await {
                Ok((job, outcome)) => report.push(job, outcome),
                Err(e) => {
                    let err = WorkflowError::TaskAborted {
                        job: fallback.label(),
                        reason: e.to_string(),
                    };
                    error!("{}", err);
                    report.push(fallback, JobOutcome::Failure);
                }
            }
        }

        debug!(
            "Status pass done: {} active, {} succeeded, {} failed",
            report.active.len(),
            report.succeeded.len(),
            report.failed.len()
        );

        report
    }

    /// Evaluates one job and announces a terminal outcome
    async fn check_job(
        controller: &dyn JobControllerRepository,
        publisher: &StatusPublisher,
        semaphore: Arc<Semaphore>,
        active_job: &SubmittedJob,
    ) -> JobOutcome {
        match Self::evaluate(controller, semaphore, active_job).await {
            Ok(outcome) => {
                Self::announce(publisher, active_job, outcome);
                outcome
            }
            Err(e) => {
                error!(
                    "Something went wrong while checking the status of job {}: {}",
                    active_job.label(),
                    e
                );
                JobOutcome::Failure
            }
        }
    }

    async fn evaluate(
        controller: &dyn JobControllerRepository,
        semaphore: Arc<Semaphore>,
        active_job: &SubmittedJob,
    ) -> Result<JobOutcome, WorkflowError> {
        if active_job.job.is_noop() {
            return Ok(JobOutcome::Success);
        }

        let job_id = active_job
            .external_id
            .as_ref()
            .ok_or_else(|| WorkflowError::MissingJobId(active_job.job.name.clone()))?;

        // Released when the query completes
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|_| WorkflowError::RateLimiterClosed)?;

        let status = Self::query_status(controller, job_id).await;
        Ok(status.outcome())
    }

    /// Fetches a job's status; every error becomes `Failed`
    async fn query_status(
        controller: &dyn JobControllerRepository,
        job_id: &JobId,
    ) -> RemoteJobStatus {
        match controller.check_status(job_id).await {
            Ok(Some(status)) => {
                let parsed = RemoteJobStatus::parse_lenient(&status);
                debug!("Job {} status: {} ({:?})", job_id, status, parsed);
                parsed
            }
            Ok(None) => {
                error!(
                    "job-controller response for job {} does not contain 'status' field. \
                     Return job failed status.",
                    job_id
                );
                RemoteJobStatus::Failed
            }
            Err(e) if e.is_not_found() => {
                error!(
                    "Job {} was not found in job-controller. Return job failed status.",
                    job_id
                );
                RemoteJobStatus::Failed
            }
            Err(e) => {
                error!(
                    "Error getting status of job with id {}. Return job failed status. Details: {}",
                    job_id, e
                );
                RemoteJobStatus::Failed
            }
        }
    }

    fn announce(publisher: &StatusPublisher, active_job: &SubmittedJob, outcome: JobOutcome) {
        let (bucket, workflow_status) = match outcome {
            JobOutcome::Success => (ProgressBucket::Finished, RunStatus::Running),
            JobOutcome::Failure => (ProgressBucket::Failed, RunStatus::Failed),
            JobOutcome::Pending => return,
        };

        info!(
            "{} job is {}. job_id: {}",
            active_job.job.name,
            if outcome == JobOutcome::Success { "finished" } else { "failed" },
            active_job
                .external_id
                .as_ref()
                .map(JobId::as_str)
                .unwrap_or("-")
        );

        publisher.publish_job_status(
            &active_job.workflow_uuid,
            active_job.external_id.as_ref(),
            bucket,
            workflow_status,
        );
    }
}
