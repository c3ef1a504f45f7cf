//! Job controller DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /jobs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    pub workflow_uuid: String,
    pub image: String,
    pub cmd: String,
    pub prettified_cmd: String,
    pub workflow_workspace: String,
    pub job_name: String,
    pub cvmfs_mounts: String,
    pub compute_backend: String,
    pub kerberos: bool,
    pub unpacked_img: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kubernetes_uid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kubernetes_memory_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kubernetes_job_timeout: Option<u64>,
    pub voms_proxy: bool,
    pub rucio: bool,
    pub htcondor_max_runtime: String,
    pub htcondor_accounting_group: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slurm_partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slurm_time: Option<String>,
}

/// Response of `POST /jobs`
///
/// The controller may return the id as a string or a number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    pub job_id: serde_json::Value,
}

impl SubmitJobResponse {
    /// The job id as a string, whatever JSON type the controller used
    pub fn job_id_string(&self) -> String {
        match &self.job_id {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Response of `GET /jobs/{job_id}`
///
/// Only `status` matters to the executor; other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}
