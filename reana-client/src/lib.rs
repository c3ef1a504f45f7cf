//! REANA job controller client
//!
//! A small, typed HTTP client for the REANA job controller. The executor uses
//! it to submit jobs, check their status and delete them.
//!
//! # Example
//!
//! ```no_run
//! use reana_client::JobControllerClient;
//!
//! # async fn example() -> reana_client::Result<()> {
//! let client = JobControllerClient::new("http://reana-job-controller:5000");
//! let status = client.check_status("42").await?;
//! println!("job 42 is {:?}", status.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use reana_core::dto::job::{JobStatusResponse, SubmitJobRequest, SubmitJobResponse};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the job controller API
#[derive(Debug, Clone)]
pub struct JobControllerClient {
    /// Base URL of the job controller (e.g., "http://reana-job-controller:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobControllerClient {
    /// Create a new job controller client
    ///
    /// # Example
    /// ```
    /// use reana_client::JobControllerClient;
    ///
    /// let client = JobControllerClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the job controller
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
