//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How a job is meant to be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    /// Shell command run inside a container by the job controller
    Shell,
    /// Code run in-process by the workflow engine (not supported remotely)
    InlineCode,
    /// Job whose outcome is already known; nothing has to run
    NoOp,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Shell => write!(f, "shell"),
            JobKind::InlineCode => write!(f, "inline-code"),
            JobKind::NoOp => write!(f, "no-op"),
        }
    }
}

/// Per-job resource requests
///
/// Every field is optional. Missing fields fall back to the defaults the job
/// controller expects when the submission request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobResources {
    pub compute_backend: Option<String>,
    pub kerberos: Option<bool>,
    pub unpacked_img: Option<bool>,
    pub kubernetes_uid: Option<i64>,
    pub kubernetes_memory_limit: Option<String>,
    pub kubernetes_job_timeout: Option<u64>,
    pub voms_proxy: Option<bool>,
    pub rucio: Option<bool>,
    pub htcondor_max_runtime: Option<String>,
    pub htcondor_accounting_group: Option<String>,
    pub slurm_partition: Option<String>,
    pub slurm_time: Option<String>,
}

/// Description of one task handed over by the host workflow engine
///
/// Read-only to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub name: String,
    pub kind: JobKind,
    #[serde(default)]
    pub shell_cmd: String,
    /// Container image reference, possibly prefixed with `docker://`
    #[serde(default)]
    pub container_image: Option<String>,
    #[serde(default)]
    pub resources: JobResources,
}

impl JobDescriptor {
    /// Creates a shell job with default resources
    pub fn shell(name: impl Into<String>, shell_cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: JobKind::Shell,
            shell_cmd: shell_cmd.into(),
            container_image: None,
            resources: JobResources::default(),
        }
    }

    /// Sets the container image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.container_image = Some(image.into());
        self
    }

    /// Sets the resource requests
    pub fn with_resources(mut self, resources: JobResources) -> Self {
        self.resources = resources;
        self
    }

    pub fn is_noop(&self) -> bool {
        self.kind == JobKind::NoOp
    }
}

/// Identifier assigned to a job by the job controller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Wraps a controller-assigned identifier, rejecting empty ones
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A job the executor is tracking
///
/// Created once, when submission succeeds. Shell jobs always carry the
/// controller-assigned id; no-op jobs are tracked without one because they are
/// never sent to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedJob {
    pub job: JobDescriptor,
    pub external_id: Option<JobId>,
    pub workflow_uuid: String,
    pub workspace: PathBuf,
}

impl SubmittedJob {
    /// Label used in log lines: the external id when known, else the job name
    pub fn label(&self) -> String {
        match &self.external_id {
            Some(id) => format!("{} ({})", self.job.name, id),
            None => self.job.name.clone(),
        }
    }
}

/// Job status as reported by the job controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteJobStatus {
    Submitted,
    Running,
    Finished,
    Failed,
    Stopped,
    Unknown,
}

impl FromStr for RemoteJobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "running" => Ok(Self::Running),
            "finished" => Ok(Self::Finished),
            "failed" => Ok(Self::Failed),
            "stopped" => Ok(Self::Stopped),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unrecognized job status '{}'", other)),
        }
    }
}

impl RemoteJobStatus {
    /// Parses a raw status string; anything unrecognized becomes `Unknown`
    pub fn parse_lenient(s: &str) -> Self {
        s.trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(RemoteJobStatus::Unknown)
    }

    /// Maps the remote taxonomy onto the executor's local outcome
    pub fn outcome(self) -> JobOutcome {
        match self {
            RemoteJobStatus::Finished => JobOutcome::Success,
            RemoteJobStatus::Failed | RemoteJobStatus::Stopped => JobOutcome::Failure,
            RemoteJobStatus::Submitted | RemoteJobStatus::Running | RemoteJobStatus::Unknown => {
                JobOutcome::Pending
            }
        }
    }
}

/// Local decision taken for a job after one status check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    Success,
    Failure,
    /// Not terminal yet; keep polling
    Pending,
}
