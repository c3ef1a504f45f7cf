//! REANA remote job executor
//!
//! Runs the jobs of a workflow on the REANA job controller on behalf of a
//! host workflow engine.
//!
//! Architecture:
//! - Configuration: settings from environment or defaults
//! - Repositories: the job controller and the workflow-status event channel
//! - Services: status publishing, job submission, cancellation
//! - Scheduler: status polling of active jobs
//! - Executor: the entry points the host engine calls
//!
//! The host engine submits each ready job with [`Executor::run_job`], calls
//! [`Executor::check_active_jobs`] repeatedly with the jobs still active, and
//! calls [`Executor::cancel_jobs`] if the run is interrupted.

pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod executor;
pub mod repository;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use context::RunContext;
pub use error::{SubmitError, WorkflowError};
pub use executor::Executor;
pub use scheduler::PollReport;
