//! Executor configuration
//!
//! Connection settings for the job controller, the fallback container image,
//! the status polling cadence and the per-job defaults that come from the
//! deployment rather than from the workflow.

use std::time::Duration;

/// Image used when a job does not name one
pub const DEFAULT_CONTAINER_IMAGE: &str = "docker.io/snakemake/snakemake:v8.27.1";

/// Executor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Job controller base URL (e.g., "http://reana-job-controller:5000")
    pub job_controller_url: String,

    /// Image used for jobs that do not specify one
    pub default_image: String,

    /// Delay requested between two status polling passes
    pub poll_interval: Duration,

    /// Maximum number of status queries in flight at once
    pub max_status_checks: usize,

    /// CVMFS mounts forwarded to every job
    pub cvmfs_mounts: String,

    /// Kerberos default for jobs that do not set it
    pub workflow_kerberos: bool,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(job_controller_url: String) -> Self {
        Self {
            job_controller_url,
            default_image: DEFAULT_CONTAINER_IMAGE.to_string(),
            poll_interval: Duration::from_secs(10),
            max_status_checks: 4,
            cvmfs_mounts: "false".to_string(),
            workflow_kerberos: false,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JOB_CONTROLLER_URL (required)
    /// - DEFAULT_CONTAINER_IMAGE (optional)
    /// - POLL_JOBS_STATUS_SLEEP_IN_SECONDS (optional, seconds, default: 10)
    /// - MAX_STATUS_CHECKS (optional, default: 4)
    /// - MOUNT_CVMFS (optional, default: "false")
    /// - WORKFLOW_KERBEROS (optional, default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        let job_controller_url = std::env::var("JOB_CONTROLLER_URL")
            .map_err(|_| anyhow::anyhow!("JOB_CONTROLLER_URL environment variable not set"))?;

        let mut config = Self::new(job_controller_url);

        if let Ok(image) = std::env::var("DEFAULT_CONTAINER_IMAGE") {
            config.default_image = image;
        }

        if let Some(interval) = std::env::var("POLL_JOBS_STATUS_SLEEP_IN_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.poll_interval = Duration::from_secs(interval);
        }

        if let Some(max) = std::env::var("MAX_STATUS_CHECKS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            config.max_status_checks = max;
        }

        if let Ok(mounts) = std::env::var("MOUNT_CVMFS") {
            config.cvmfs_mounts = mounts;
        }

        config.workflow_kerberos = std::env::var("WORKFLOW_KERBEROS")
            .ok()
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        Ok(config)
    }

    /// Sets the polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the status query concurrency limit
    pub fn with_max_status_checks(mut self, max: usize) -> Self {
        self.max_status_checks = max;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.job_controller_url.is_empty() {
            anyhow::bail!("job_controller_url cannot be empty");
        }

        if !self.job_controller_url.starts_with("http://")
            && !self.job_controller_url.starts_with("https://")
        {
            anyhow::bail!("job_controller_url must start with http:// or https://");
        }

        if self.default_image.is_empty() {
            anyhow::bail!("default_image cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_status_checks == 0 {
            anyhow::bail!("max_status_checks must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://reana-job-controller:5000".to_string())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.max_status_checks, 4);
        assert_eq!(config.default_image, DEFAULT_CONTAINER_IMAGE);
        assert_eq!(config.cvmfs_mounts, "false");
        assert!(!config.workflow_kerberos);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.job_controller_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.job_controller_url = "http://localhost:5000".to_string();
        assert!(config.validate().is_ok());

        let config = Config::default().with_max_status_checks(0);
        assert!(config.validate().is_err());

        let config = Config::default().with_poll_interval(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" True "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
