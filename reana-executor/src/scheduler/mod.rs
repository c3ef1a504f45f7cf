//! Scheduler layer
//!
//! Status polling of the jobs the executor has submitted. One call is one
//! pass over the active set; the host engine decides when the next pass runs.

pub mod poller;

pub use poller::{PollReport, StatusPoller};
