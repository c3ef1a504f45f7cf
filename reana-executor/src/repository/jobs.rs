//! Job controller repository
//!
//! Handles communication with the job controller:
//! - Submitting jobs
//! - Checking job status
//! - Deleting jobs

use async_trait::async_trait;
use reana_client::{JobControllerClient, Result, SubmitJobRequest};
use reana_core::domain::job::JobId;

/// Repository trait for job controller operations
#[async_trait]
pub trait JobControllerRepository: Send + Sync {
    /// Submits a job and returns the controller-assigned id, stringified
    async fn submit(&self, req: &SubmitJobRequest) -> Result<String>;

    /// Fetches the raw status of a job
    ///
    /// `Ok(None)` means the controller answered without a status field.
    async fn check_status(&self, job_id: &JobId) -> Result<Option<String>>;

    /// Deletes a job
    async fn delete_job(&self, job_id: &JobId) -> Result<()>;
}

#[async_trait]
impl JobControllerRepository for JobControllerClient {
    async fn submit(&self, req: &SubmitJobRequest) -> Result<String> {
        let response = JobControllerClient::submit(self, req).await?;
        Ok(response.job_id_string())
    }

    async fn check_status(&self, job_id: &JobId) -> Result<Option<String>> {
        let response = JobControllerClient::check_status(self, job_id.as_str()).await?;
        Ok(response.status)
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<()> {
        JobControllerClient::delete_job(self, job_id.as_str()).await
    }
}
