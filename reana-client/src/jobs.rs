//! Job endpoints

use crate::JobControllerClient;
use crate::error::{ClientError, Result};
use reana_core::dto::job::{JobStatusResponse, SubmitJobRequest, SubmitJobResponse};
use tracing::debug;

impl JobControllerClient {
    /// Submit a job
    ///
    /// # Returns
    /// The controller's response holding the assigned job id
    pub async fn submit(&self, req: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        let url = format!("{}/jobs", self.base_url);
        debug!("Submitting job '{}' to {}", req.job_name, url);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get the status of a job
    ///
    /// A 404 from the controller is returned as [`ClientError::NotFound`].
    pub async fn check_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let url = format!("{}/jobs/{}", self.base_url, job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await.map_err(|e| {
            if e.is_not_found() {
                ClientError::NotFound(job_id.to_string())
            } else {
                e
            }
        })
    }

    /// Delete (stop) a job
    pub async fn delete_job(&self, job_id: &str) -> Result<()> {
        let url = format!("{}/jobs/{}", self.base_url, job_id);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
