//! Workflow-status event channel

use reana_core::dto::event::WorkflowStatusEvent;
use tokio::sync::mpsc;
use tracing::warn;

/// Fire-and-forget sink for workflow-status events
///
/// Delivery guarantees belong to the implementation; callers never wait for
/// an acknowledgment.
pub trait EventChannel: Send + Sync {
    fn send(&self, event: WorkflowStatusEvent);
}

/// In-process channel backed by an unbounded tokio mpsc queue
///
/// The receiving half is handed to whatever forwards events to the workflow
/// controller.
#[derive(Clone)]
pub struct MpscEventChannel {
    sender: mpsc::UnboundedSender<WorkflowStatusEvent>,
}

impl MpscEventChannel {
    /// Creates the channel and its receiving half
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WorkflowStatusEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventChannel for MpscEventChannel {
    fn send(&self, event: WorkflowStatusEvent) {
        if let Err(e) = self.sender.send(event) {
            warn!(
                "Dropping workflow status event for {}: receiver closed",
                e.0.workflow_uuid
            );
        }
    }
}
