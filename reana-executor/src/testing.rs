//! Fakes for the job controller and the event channel

use async_trait::async_trait;
use reana_client::{ClientError, Result, SubmitJobRequest};
use reana_core::domain::job::{JobDescriptor, JobId, SubmittedJob};
use reana_core::domain::workflow::RunStatus;
use reana_core::dto::event::WorkflowStatusEvent;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::repository::{EventChannel, JobControllerRepository};

/// What the fake controller answers for a status query
#[derive(Debug, Clone)]
pub enum FakeStatus {
    Status(&'static str),
    /// Status sequence consumed one entry per query; the last one sticks
    Sequence(Vec<&'static str>),
    MissingField,
    NotFound,
    ServerError,
}

#[derive(Default)]
pub struct FakeController {
    pub submitted: Mutex<Vec<SubmitJobRequest>>,
    pub status_queries: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    statuses: Mutex<HashMap<String, FakeStatus>>,
    failing_deletes: Mutex<Vec<String>>,
    fail_submit: Mutex<bool>,
    next_id: AtomicUsize,
    query_delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeController {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    pub fn set_status(&self, job_id: &str, status: FakeStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert(job_id.to_string(), status);
    }

    pub fn fail_submissions(&self) {
        *self.fail_submit.lock().unwrap() = true;
    }

    pub fn fail_delete(&self, job_id: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .push(job_id.to_string());
    }

    pub fn delay_queries(&self, delay: Duration) {
        *self.query_delay.lock().unwrap() = Some(delay);
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.status_queries.lock().unwrap().len()
    }
}

#[async_trait]
impl JobControllerRepository for FakeController {
    async fn submit(&self, req: &SubmitJobRequest) -> Result<String> {
        if *self.fail_submit.lock().unwrap() {
            return Err(ClientError::api_error(500, "controller unavailable"));
        }
        self.submitted.lock().unwrap().push(req.clone());
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst).to_string())
    }

    async fn check_status(&self, job_id: &JobId) -> Result<Option<String>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.query_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.status_queries
            .lock()
            .unwrap()
            .push(job_id.to_string());

        let answer = {
            let mut statuses = self.statuses.lock().unwrap();
            match statuses.get_mut(job_id.as_str()) {
                Some(FakeStatus::Sequence(seq)) if seq.len() > 1 => {
                    Some(FakeStatus::Status(seq.remove(0)))
                }
                Some(FakeStatus::Sequence(seq)) => seq.first().map(|s| FakeStatus::Status(*s)),
                Some(other) => Some(other.clone()),
                None => None,
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match answer {
            Some(FakeStatus::Status(status)) => Ok(Some(status.to_string())),
            Some(FakeStatus::MissingField) => Ok(None),
            Some(FakeStatus::ServerError) => Err(ClientError::api_error(503, "unavailable")),
            Some(FakeStatus::NotFound) | None => Err(ClientError::NotFound(job_id.to_string())),
            Some(FakeStatus::Sequence(_)) => unreachable!("sequences resolve to a status"),
        }
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<()> {
        if self
            .failing_deletes
            .lock()
            .unwrap()
            .contains(&job_id.to_string())
        {
            return Err(ClientError::api_error(500, "delete failed"));
        }
        self.deleted.lock().unwrap().push(job_id.to_string());
        Ok(())
    }
}

/// Event channel that keeps every event it receives
#[derive(Default)]
pub struct RecordingChannel {
    events: Mutex<Vec<WorkflowStatusEvent>>,
}

impl RecordingChannel {
    pub fn events(&self) -> Vec<WorkflowStatusEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<RunStatus> {
        self.events()
            .iter()
            .filter_map(|e| e.run_status())
            .collect()
    }
}

impl EventChannel for RecordingChannel {
    fn send(&self, event: WorkflowStatusEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A tracked shell job with the given controller id
pub fn tracked(job_id: &str) -> SubmittedJob {
    SubmittedJob {
        job: JobDescriptor::shell(format!("job-{}", job_id), "echo hi"),
        external_id: JobId::new(job_id),
        workflow_uuid: "wf-1".to_string(),
        workspace: PathBuf::from("/var/reana/wf-1"),
    }
}
