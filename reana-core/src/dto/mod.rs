//! Data Transfer Objects
//!
//! Bodies exchanged with the job controller and events sent to the
//! workflow-status channel.

pub mod event;
pub mod job;
