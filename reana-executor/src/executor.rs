//! Executor
//!
//! The object a host workflow engine is handed at startup. It bundles the
//! submitter, the status poller and the cancellation handler around one job
//! controller and one event channel.

use reana_core::domain::job::{JobDescriptor, SubmittedJob};
use reana_core::domain::workflow::RunStatus;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::context::RunContext;
use crate::error::SubmitError;
use crate::repository::{EventChannel, JobControllerRepository};
use crate::scheduler::{PollReport, StatusPoller};
use crate::service::{CancelSummary, CancellationHandler, JobSubmitter, StatusPublisher};

/// Remote job executor
pub struct Executor {
    publisher: Arc<StatusPublisher>,
    submitter: JobSubmitter,
    poller: StatusPoller,
    canceller: CancellationHandler,
}

impl Executor {
    pub fn new(
        config: &Config,
        controller: Arc<dyn JobControllerRepository>,
        channel: Arc<dyn EventChannel>,
    ) -> Self {
        let publisher = Arc::new(StatusPublisher::new(channel));

        Self {
            submitter: JobSubmitter::new(config, Arc::clone(&controller), Arc::clone(&publisher)),
            poller: StatusPoller::new(config, Arc::clone(&controller), Arc::clone(&publisher)),
            canceller: CancellationHandler::new(controller, Arc::clone(&publisher)),
            publisher,
        }
    }

    /// Announces the start of a run with `total_jobs` planned jobs
    pub fn start_workflow(&self, ctx: &RunContext, total_jobs: usize) {
        info!(
            "Workflow {} started with {} job(s)",
            ctx.workflow_uuid, total_jobs
        );
        self.publisher
            .publish_workflow_start(&ctx.workflow_uuid, total_jobs);
    }

    /// Submits one job
    ///
    /// On error the job is not tracked; the host should account it as failed.
    pub async fn run_job(
        &self,
        ctx: &RunContext,
        job: JobDescriptor,
    ) -> Result<SubmittedJob, SubmitError> {
        self.submitter.submit(ctx, job).await
    }

    /// One polling pass over the active jobs
    pub async fn check_active_jobs(&self, active_jobs: Vec<SubmittedJob>) -> PollReport {
        self.poller.check_active_jobs(active_jobs).await
    }

    /// Deletes every active job and marks the run as failed
    pub async fn cancel_jobs(
        &self,
        ctx: &RunContext,
        active_jobs: &[SubmittedJob],
    ) -> CancelSummary {
        self.canceller.cancel_jobs(ctx, active_jobs).await
    }

    /// Announces the end of a run
    pub fn finish_workflow(&self, ctx: &RunContext, success: bool) {
        let status = if success {
            RunStatus::Finished
        } else {
            RunStatus::Failed
        };
        info!("Workflow {} ended: {}", ctx.workflow_uuid, status);
        self.publisher
            .publish_workflow_status(&ctx.workflow_uuid, status, None);
    }

    /// Delay requested between two polling passes
    pub fn next_sleep(&self) -> Duration {
        self.poller.poll_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeController, FakeStatus, RecordingChannel};
    use reana_core::domain::progress::ProgressBucket;

    fn executor() -> (Executor, Arc<FakeController>, Arc<RecordingChannel>) {
        let controller = Arc::new(FakeController::new());
        let channel = Arc::new(RecordingChannel::default());
        let executor = Executor::new(&Config::default(), controller.clone(), channel.clone());
        (executor, controller, channel)
    }

    #[tokio::test]
    async fn test_job_lifecycle() {
        let (executor, controller, channel) = executor();
        let ctx = RunContext::new("wf-1", "/ws");

        executor.start_workflow(&ctx, 1);
        let submitted = executor
            .run_job(&ctx, JobDescriptor::shell("fit", "python fit.py"))
            .await
            .unwrap();
        let job_id = submitted.external_id.clone().unwrap();

        controller.set_status(job_id.as_str(), FakeStatus::Status("running"));
        let report = executor.check_active_jobs(vec![submitted]).await;
        assert_eq!(report.active.len(), 1);

        controller.set_status(job_id.as_str(), FakeStatus::Status("finished"));
        let report = executor.check_active_jobs(report.active).await;
        assert_eq!(report.succeeded.len(), 1);

        executor.finish_workflow(&ctx, true);

        assert_eq!(
            channel.statuses(),
            vec![
                RunStatus::Running,
                RunStatus::Running,
                RunStatus::Running,
                RunStatus::Finished
            ]
        );
        let events = channel.events();
        assert!(events[0].progress().and_then(|p| p.bucket(ProgressBucket::Total)).is_some());
        assert!(events[1].progress().and_then(|p| p.bucket(ProgressBucket::Running)).is_some());
        assert!(events[2].progress().and_then(|p| p.bucket(ProgressBucket::Finished)).is_some());
    }

    #[tokio::test]
    async fn test_cancel_after_failure_keeps_run_failed() {
        let (executor, _, channel) = executor();
        let ctx = RunContext::new("wf-1", "/ws");

        let job = executor
            .run_job(&ctx, JobDescriptor::shell("fit", "python fit.py"))
            .await
            .unwrap();

        let summary = executor.cancel_jobs(&ctx, &[job]).await;
        executor.finish_workflow(&ctx, true);

        assert_eq!(summary.requested, 1);
        assert_eq!(
            channel.statuses(),
            vec![RunStatus::Running, RunStatus::Failed, RunStatus::Failed]
        );
    }

    #[test]
    fn test_next_sleep_follows_config() {
        let (executor, _, _) = executor();
        assert_eq!(executor.next_sleep(), Config::default().poll_interval);
    }
}
