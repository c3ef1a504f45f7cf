//! Executor error types

use reana_client::ClientError;
use reana_core::domain::job::JobKind;
use thiserror::Error;

/// Why a job could not be handed to the job controller
///
/// Returned to the host engine so the job can be accounted as failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("job '{job}' has kind {kind}, which cannot run on the job controller")]
    UnsupportedJobKind { job: String, kind: JobKind },

    #[error("failed to submit job '{job}': {source}")]
    Request {
        job: String,
        #[source]
        source: ClientError,
    },

    #[error("job controller returned an empty job id for job '{job}'")]
    EmptyJobId { job: String },
}

impl SubmitError {
    /// Name of the job that could not be submitted
    pub fn job_name(&self) -> &str {
        match self {
            SubmitError::UnsupportedJobKind { job, .. }
            | SubmitError::Request { job, .. }
            | SubmitError::EmptyJobId { job } => job,
        }
    }
}

/// Errors raised while evaluating a tracked job during a polling pass
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("job '{0}' is tracked without a job controller id")]
    MissingJobId(String),

    #[error("status rate limiter is closed")]
    RateLimiterClosed,

    #[error("status check task for job '{job}' did not complete: {reason}")]
    TaskAborted { job: String, reason: String },
}
