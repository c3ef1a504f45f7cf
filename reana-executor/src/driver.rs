//! Minimal host loop
//!
//! Runs a flat list of independent jobs through an [`Executor`]: announce the
//! run, submit every job, poll until nothing is active, publish the final
//! status. Resolving `shutdown` cancels whatever is still active.

use reana_core::domain::job::{JobDescriptor, SubmittedJob};
use std::future::Future;
use tracing::{error, info, warn};

use crate::context::RunContext;
use crate::executor::Executor;

/// What happened to the jobs of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Jobs that could not be submitted
    pub rejected: usize,
    /// Jobs still active when the run was interrupted
    pub cancelled: usize,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        !self.interrupted && self.failed == 0 && self.rejected == 0
    }
}

/// Drives `jobs` to completion
///
/// `shutdown` is checked before every submission and raced against every
/// polling pass and sleep. Once it resolves, every job submitted so far that
/// has not reached a terminal outcome is cancelled.
pub async fn run_jobs<F>(
    executor: &Executor,
    ctx: &RunContext,
    jobs: Vec<JobDescriptor>,
    shutdown: F,
) -> RunSummary
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut summary = RunSummary::default();
    executor.start_workflow(ctx, jobs.len());

    let mut active: Vec<SubmittedJob> = Vec::with_capacity(jobs.len());
    for job in jobs {
        let submission = tokio::select! {
            biased;
            _ = &mut shutdown => {
                return interrupt(executor, ctx, &active, summary).await;
            }
            submission = executor.run_job(ctx, job) => submission,
        };

        match submission {
            Ok(submitted) => active.push(submitted),
            Err(e) => {
                error!("Job '{}' was not submitted: {}", e.job_name(), e);
                summary.rejected += 1;
            }
        }
    }

    while !active.is_empty() {
        let report = tokio::select! {
            biased;
            _ = &mut shutdown => {
                return interrupt(executor, ctx, &active, summary).await;
            }
            report = executor.check_active_jobs(active.clone()) => report,
        };
        summary.succeeded += report.succeeded.len();
        summary.failed += report.failed.len();
        active = report.active;

        if active.is_empty() {
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                return interrupt(executor, ctx, &active, summary).await;
            }
            _ = tokio::time::sleep(report.next_sleep) => {}
        }
    }

    info!(
        "Workflow {} done: {} succeeded, {} failed, {} not submitted",
        ctx.workflow_uuid, summary.succeeded, summary.failed, summary.rejected
    );
    executor.finish_workflow(ctx, summary.is_success());

    summary
}

async fn interrupt(
    executor: &Executor,
    ctx: &RunContext,
    active: &[SubmittedJob],
    mut summary: RunSummary,
) -> RunSummary {
    warn!("Interrupted with {} active job(s), cancelling", active.len());
    executor.cancel_jobs(ctx, active).await;
    summary.cancelled = active.len();
    summary.interrupted = true;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{FakeController, FakeStatus, RecordingChannel};
    use reana_core::domain::job::JobKind;
    use reana_core::domain::workflow::RunStatus;
    use std::sync::Arc;
    use std::time::Duration;

    fn executor() -> (Executor, Arc<FakeController>, Arc<RecordingChannel>) {
        let config = Config::default().with_poll_interval(Duration::from_millis(5));
        let controller = Arc::new(FakeController::new());
        let channel = Arc::new(RecordingChannel::default());
        let executor = Executor::new(&config, controller.clone(), channel.clone());
        (executor, controller, channel)
    }

    fn ctx() -> RunContext {
        RunContext::new("wf-1", "/ws")
    }

    #[tokio::test]
    async fn test_all_jobs_finish() {
        let (executor, controller, channel) = executor();
        controller.set_status("1", FakeStatus::Sequence(vec!["running", "finished"]));
        controller.set_status("2", FakeStatus::Status("finished"));

        let jobs = vec![
            JobDescriptor::shell("a", "true"),
            JobDescriptor::shell("b", "true"),
        ];
        let summary = run_jobs(&executor, &ctx(), jobs, std::future::pending()).await;

        assert_eq!(summary.succeeded, 2);
        assert!(summary.is_success());
        assert_eq!(channel.statuses().last(), Some(&RunStatus::Finished));
    }

    #[tokio::test]
    async fn test_rejected_job_fails_the_run() {
        let (executor, controller, channel) = executor();
        controller.set_status("1", FakeStatus::Status("finished"));
        let mut inline = JobDescriptor::shell("py", "");
        inline.kind = JobKind::InlineCode;

        let jobs = vec![JobDescriptor::shell("a", "true"), inline];
        let summary = run_jobs(&executor, &ctx(), jobs, std::future::pending()).await;

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.rejected, 1);
        assert!(!summary.is_success());
        assert_eq!(channel.statuses().last(), Some(&RunStatus::Failed));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_active_jobs() {
        let (executor, controller, channel) = executor();
        controller.set_status("1", FakeStatus::Status("running"));
        controller.set_status("2", FakeStatus::Status("running"));

        let jobs = vec![
            JobDescriptor::shell("a", "true"),
            JobDescriptor::shell("b", "true"),
        ];
        let shutdown = tokio::time::sleep(Duration::from_millis(30));
        let summary = run_jobs(&executor, &ctx(), jobs, shutdown).await;

        assert!(summary.interrupted);
        assert_eq!(summary.cancelled, 2);
        let mut deleted = controller.deleted_ids();
        deleted.sort();
        assert_eq!(deleted, vec!["1", "2"]);
        assert_eq!(channel.statuses().last(), Some(&RunStatus::Failed));
    }

    #[tokio::test]
    async fn test_shutdown_before_start_submits_nothing() {
        let (executor, controller, channel) = executor();
        controller.set_status("1", FakeStatus::Status("finished"));
        controller.set_status("2", FakeStatus::Status("finished"));
        controller.set_status("3", FakeStatus::Status("finished"));

        let jobs = vec![
            JobDescriptor::shell("a", "true"),
            JobDescriptor::shell("b", "true"),
            JobDescriptor::shell("c", "true"),
        ];
        let summary = run_jobs(&executor, &ctx(), jobs, async {}).await;

        assert!(summary.interrupted);
        assert_eq!(summary.cancelled, 0);
        assert!(!summary.is_success());
        assert!(controller.submitted.lock().unwrap().is_empty());
        assert!(controller.deleted_ids().is_empty());
        assert_eq!(channel.statuses().last(), Some(&RunStatus::Failed));
    }

    #[tokio::test]
    async fn test_shutdown_during_status_pass_cancels_jobs() {
        let (executor, controller, channel) = executor();
        controller.set_status("1", FakeStatus::Status("finished"));
        controller.set_status("2", FakeStatus::Status("finished"));
        controller.delay_queries(Duration::from_millis(500));

        let jobs = vec![
            JobDescriptor::shell("a", "true"),
            JobDescriptor::shell("b", "true"),
        ];
        let shutdown = tokio::time::sleep(Duration::from_millis(20));
        let summary = run_jobs(&executor, &ctx(), jobs, shutdown).await;

        assert!(summary.interrupted);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.cancelled, 2);
        let mut deleted = controller.deleted_ids();
        deleted.sort();
        assert_eq!(deleted, vec!["1", "2"]);
        assert_eq!(channel.statuses().last(), Some(&RunStatus::Failed));
    }
}
