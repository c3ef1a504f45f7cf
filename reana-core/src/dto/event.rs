//! Workflow-status events
//!
//! Shape of the messages sent to the workflow-status channel.

use serde::{Deserialize, Serialize};

use crate::domain::progress::Progress;
use crate::domain::workflow::RunStatus;

/// Free text or a progress snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventMessage {
    Progress { progress: Progress },
    Text(String),
}

/// One workflow-status event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStatusEvent {
    pub workflow_uuid: String,
    /// Numeric run status code
    pub status: u8,
    #[serde(default)]
    pub logs: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<EventMessage>,
}

impl WorkflowStatusEvent {
    pub fn new(
        workflow_uuid: impl Into<String>,
        status: RunStatus,
        message: Option<EventMessage>,
    ) -> Self {
        Self {
            workflow_uuid: workflow_uuid.into(),
            status: status.code(),
            logs: String::new(),
            message,
        }
    }

    /// Decoded run status, if the code is known
    pub fn run_status(&self) -> Option<RunStatus> {
        RunStatus::from_code(self.status)
    }

    /// Progress snapshot carried by this event, if any
    pub fn progress(&self) -> Option<&Progress> {
        match &self.message {
            Some(EventMessage::Progress { progress }) => Some(progress),
            _ => None,
        }
    }
}
