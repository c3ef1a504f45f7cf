//! Core domain types
//!
//! These types describe the jobs handed over by the host workflow engine and
//! the statuses the executor reasons about. They are shared between the
//! client (wire format) and the executor (lifecycle logic).

pub mod job;
pub mod progress;
pub mod workflow;
