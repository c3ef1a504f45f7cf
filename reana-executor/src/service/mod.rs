//! Service layer
//!
//! Services hold the executor's business logic: announcing status changes,
//! submitting jobs and cancelling them. They talk to the outside world only
//! through the repository traits.

mod cancellation;
mod publisher;
mod submitter;

pub use cancellation::{CancelSummary, CancellationHandler, INTERRUPTED_MESSAGE};
pub use publisher::StatusPublisher;
pub use submitter::{JobSubmitter, resolve_image};
