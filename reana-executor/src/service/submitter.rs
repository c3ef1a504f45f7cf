//! Job submitter
//!
//! Translates a job descriptor into a job controller submission request,
//! sends it and records the assigned id.

use reana_core::domain::job::{JobDescriptor, JobId, JobKind, SubmittedJob};
use reana_core::dto::job::SubmitJobRequest;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::context::RunContext;
use crate::error::SubmitError;
use crate::repository::JobControllerRepository;
use crate::service::StatusPublisher;

const DOCKER_SCHEME: &str = "docker://";

/// Image a job runs in: its own (without the `docker://` scheme) or the default
pub fn resolve_image(job: &JobDescriptor, default_image: &str) -> String {
    match job.container_image.as_deref() {
        Some(image) if !image.is_empty() => {
            let image = image.replace(DOCKER_SCHEME, "");
            info!("Environment: {}", image);
            image
        }
        _ => {
            info!("No environment specified, falling back to: {}", default_image);
            default_image.to_string()
        }
    }
}

pub struct JobSubmitter {
    controller: Arc<dyn JobControllerRepository>,
    publisher: Arc<StatusPublisher>,
    default_image: String,
    cvmfs_mounts: String,
    workflow_kerberos: bool,
}

impl JobSubmitter {
    pub fn new(
        config: &Config,
        controller: Arc<dyn JobControllerRepository>,
        publisher: Arc<StatusPublisher>,
    ) -> Self {
        Self {
            controller,
            publisher,
            default_image: config.default_image.clone(),
            cvmfs_mounts: config.cvmfs_mounts.clone(),
            workflow_kerberos: config.workflow_kerberos,
        }
    }

    /// Builds the job controller request for a shell job
    pub fn build_request(&self, ctx: &RunContext, job: &JobDescriptor) -> SubmitJobRequest {
        let workspace = ctx.workspace_str();
        let resources = &job.resources;

        SubmitJobRequest {
            workflow_uuid: ctx.workflow_uuid.clone(),
            image: resolve_image(job, &self.default_image),
            cmd: format!("cd {} && {}", workspace, job.shell_cmd),
            prettified_cmd: job.shell_cmd.clone(),
            workflow_workspace: workspace,
            job_name: job.name.clone(),
            cvmfs_mounts: self.cvmfs_mounts.clone(),
            compute_backend: resources.compute_backend.clone().unwrap_or_default(),
            kerberos: resources.kerberos.unwrap_or(self.workflow_kerberos),
            unpacked_img: resources.unpacked_img.unwrap_or(false),
            kubernetes_uid: resources.kubernetes_uid,
            kubernetes_memory_limit: resources.kubernetes_memory_limit.clone(),
            kubernetes_job_timeout: resources.kubernetes_job_timeout,
            voms_proxy: resources.voms_proxy.unwrap_or(false),
            rucio: resources.rucio.unwrap_or(false),
            htcondor_max_runtime: resources.htcondor_max_runtime.clone().unwrap_or_default(),
            htcondor_accounting_group: resources
                .htcondor_accounting_group
                .clone()
                .unwrap_or_default(),
            slurm_partition: resources.slurm_partition.clone(),
            slurm_time: resources.slurm_time.clone(),
        }
    }

    /// Submits one job
    ///
    /// No-op jobs are tracked without contacting the controller. Inline-code
    /// jobs cannot run remotely and are rejected.
    pub async fn submit(
        &self,
        ctx: &RunContext,
        job: JobDescriptor,
    ) -> Result<SubmittedJob, SubmitError> {
        info!("Job '{}' received, command: {}", job.name, job.shell_cmd);

        match job.kind {
            JobKind::Shell => self.submit_shell(ctx, job).await,
            JobKind::NoOp => {
                info!("Job '{}' has nothing to run, tracking it locally", job.name);
                Ok(Self::track(ctx, job, None))
            }
            JobKind::InlineCode => {
                error!("Job '{}': inline code execution is not supported", job.name);
                Err(SubmitError::UnsupportedJobKind {
                    job: job.name,
                    kind: job.kind,
                })
            }
        }
    }

    async fn submit_shell(
        &self,
        ctx: &RunContext,
        job: JobDescriptor,
    ) -> Result<SubmittedJob, SubmitError> {
        let request = self.build_request(ctx, &job);

        let raw_id = match self.controller.submit(&request).await {
            Ok(id) => id,
            Err(e) => {
                error!("Error submitting job {}: {}", job.name, e);
                return Err(SubmitError::Request {
                    job: job.name,
                    source: e,
                });
            }
        };

        let Some(job_id) = JobId::new(raw_id) else {
            error!("Job controller returned an empty id for job {}", job.name);
            return Err(SubmitError::EmptyJobId { job: job.name });
        };

        info!("submitted job: {}", job_id);
        self.publisher
            .publish_job_submission(&ctx.workflow_uuid, &job_id);

        Ok(Self::track(ctx, job, Some(job_id)))
    }

    fn track(ctx: &RunContext, job: JobDescriptor, external_id: Option<JobId>) -> SubmittedJob {
        SubmittedJob {
            job,
            external_id,
            workflow_uuid: ctx.workflow_uuid.clone(),
            workspace: ctx.workspace.clone(),
        }
    }
}
