//! Status publisher
//!
//! Turns job and workflow status changes into workflow-status events and
//! hands them to the event channel. Publishing is fire-and-forget.
//!
//! The publisher remembers which runs it has reported as failed: once a run
//! is failed, later events for it keep the failed status so the run never
//! appears to recover.

use reana_core::domain::job::JobId;
use reana_core::domain::progress::{BucketSummary, Progress, ProgressBucket};
use reana_core::domain::workflow::RunStatus;
use reana_core::dto::event::{EventMessage, WorkflowStatusEvent};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::repository::EventChannel;

pub struct StatusPublisher {
    channel: Arc<dyn EventChannel>,
    failed_runs: Mutex<HashSet<String>>,
}

impl StatusPublisher {
    pub fn new(channel: Arc<dyn EventChannel>) -> Self {
        Self {
            channel,
            failed_runs: Mutex::new(HashSet::new()),
        }
    }

    /// Announces that a job was accepted by the job controller
    pub fn publish_job_submission(&self, workflow_uuid: &str, job_id: &JobId) {
        info!("Publishing submission of job {} for workflow {}", job_id, workflow_uuid);
        self.publish_progress(
            workflow_uuid,
            RunStatus::Running,
            Progress::job(ProgressBucket::Running, job_id),
        );
    }

    /// Announces that a job reached `bucket`
    ///
    /// Jobs without a controller id only move the workflow status.
    pub fn publish_job_status(
        &self,
        workflow_uuid: &str,
        job_id: Option<&JobId>,
        bucket: ProgressBucket,
        workflow_status: RunStatus,
    ) {
        match job_id {
            Some(job_id) => {
                self.publish_progress(workflow_uuid, workflow_status, Progress::job(bucket, job_id))
            }
            None => self.publish_workflow_status(workflow_uuid, workflow_status, None),
        }
    }

    /// Announces the start of a run with its planned number of jobs
    pub fn publish_workflow_start(&self, workflow_uuid: &str, total_jobs: usize) {
        self.publish_progress(
            workflow_uuid,
            RunStatus::Running,
            Progress::with_bucket(ProgressBucket::Total, BucketSummary::count(total_jobs)),
        );
    }

    pub fn publish_progress(&self, workflow_uuid: &str, status: RunStatus, progress: Progress) {
        self.publish_workflow_status(
            workflow_uuid,
            status,
            Some(EventMessage::Progress { progress }),
        );
    }

    /// Sends one workflow-status event
    pub fn publish_workflow_status(
        &self,
        workflow_uuid: &str,
        status: RunStatus,
        message: Option<EventMessage>,
    ) {
        let status = self.settle_status(workflow_uuid, status);
        debug!("Publishing workflow {} status {}", workflow_uuid, status);
        self.channel
            .send(WorkflowStatusEvent::new(workflow_uuid, status, message));
    }

    fn settle_status(&self, workflow_uuid: &str, status: RunStatus) -> RunStatus {
        let mut failed = self.failed_runs.lock().unwrap_or_else(|e| e.into_inner());
        if failed.contains(workflow_uuid) {
            return RunStatus::Failed;
        }
        if status == RunStatus::Failed {
            failed.insert(workflow_uuid.to_string());
        }
        status
    }
}
