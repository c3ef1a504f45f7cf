//! Cancellation handler
//!
//! Best-effort stop of every active job when the run is interrupted.

use reana_core::domain::job::SubmittedJob;
use reana_core::domain::workflow::RunStatus;
use reana_core::dto::event::EventMessage;
use std::sync::Arc;
use tracing::{info, warn};

use crate::context::RunContext;
use crate::repository::JobControllerRepository;
use crate::service::StatusPublisher;

pub const INTERRUPTED_MESSAGE: &str =
    "Workflow execution was interrupted and all jobs are cancelled";

/// Outcome of a cancellation sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancelSummary {
    /// Delete requests issued
    pub requested: usize,
    /// Delete requests the controller rejected
    pub failed: usize,
}

pub struct CancellationHandler {
    controller: Arc<dyn JobControllerRepository>,
    publisher: Arc<StatusPublisher>,
}

impl CancellationHandler {
    pub fn new(
        controller: Arc<dyn JobControllerRepository>,
        publisher: Arc<StatusPublisher>,
    ) -> Self {
        Self {
            controller,
            publisher,
        }
    }

    /// Deletes every active job, then publishes the run as failed
    ///
    /// Deletes run one after the other and are not rate limited. A failed
    /// delete is logged and does not stop the sweep.
    pub async fn cancel_jobs(
        &self,
        ctx: &RunContext,
        active_jobs: &[SubmittedJob],
    ) -> CancelSummary {
        info!(
            "Cancelling {} active job(s) of workflow {}",
            active_jobs.len(),
            ctx.workflow_uuid
        );

        let mut summary = CancelSummary::default();

        for active_job in active_jobs {
            let Some(job_id) = &active_job.external_id else {
                continue;
            };

            summary.requested += 1;
            if let Err(e) = self.controller.delete_job(job_id).await {
                summary.failed += 1;
                warn!("Failed to delete job {}: {}", active_job.label(), e);
            }
        }

        self.publisher.publish_workflow_status(
            &ctx.workflow_uuid,
            RunStatus::Failed,
            Some(EventMessage::Text(INTERRUPTED_MESSAGE.to_string())),
        );

        summary
    }
}
