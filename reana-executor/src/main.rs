//! REANA executor driver
//!
//! Runs a list of independent jobs, read from a JSON file, on the job
//! controller and prints the workflow-status events it publishes.

use anyhow::{Context, Result};
use clap::Parser;
use reana_client::JobControllerClient;
use reana_core::domain::job::JobDescriptor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reana_executor::driver::run_jobs;
use reana_executor::repository::MpscEventChannel;
use reana_executor::{Config, Executor, RunContext};

#[derive(Parser)]
#[command(name = "reana-executor")]
#[command(about = "Run workflow jobs on the REANA job controller", long_about = None)]
struct Cli {
    /// JSON file holding the list of jobs to run
    jobs_file: PathBuf,

    /// Workflow run identifier (generated when absent)
    #[arg(long, env = "WORKFLOW_UUID")]
    workflow_uuid: Option<String>,

    /// Workflow workspace path
    #[arg(long, env = "WORKFLOW_WORKSPACE", default_value = ".")]
    workspace: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reana_executor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Listen for Ctrl-C before anything is submitted
    let (interrupt_tx, interrupted) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = interrupt_tx.send(());
            }
            Err(e) => error!("Failed to listen for interrupt: {}", e),
        }
    });

    let config = load_config()?;
    info!(
        "Loaded configuration: job_controller_url={}, poll_interval={:?}",
        config.job_controller_url, config.poll_interval
    );

    let jobs = load_jobs(&cli.jobs_file).await?;
    let ctx = RunContext::new(
        cli.workflow_uuid
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        cli.workspace,
    );
    info!(
        "Running {} job(s) for workflow {} in {}",
        jobs.len(),
        ctx.workflow_uuid,
        ctx.workspace().display()
    );

    let client = Arc::new(JobControllerClient::new(config.job_controller_url.clone()));
    let (channel, mut events) = MpscEventChannel::new();

    let event_logger = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => info!(target: "reana_executor::events", "{}", line),
                Err(e) => warn!("Failed to serialize workflow status event: {}", e),
            }
        }
    });

    let executor = Executor::new(&config, client, Arc::new(channel));

    let shutdown = async {
        // A dropped sender means the listener failed; never interrupt then
        if interrupted.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let summary = run_jobs(&executor, &ctx, jobs, shutdown).await;

    // Closing the channel lets the logger drain and exit
    drop(executor);
    if let Err(e) = event_logger.await {
        warn!("Event logger task failed: {}", e);
    }

    info!("Run summary: {:?}", summary);
    if !summary.is_success() {
        anyhow::bail!("workflow {} did not succeed", ctx.workflow_uuid);
    }

    Ok(())
}

/// Loads configuration from environment variables with fallback to defaults
fn load_config() -> Result<Config> {
    match Config::from_env() {
        Ok(config) => {
            config.validate()?;
            Ok(config)
        }
        Err(_) => {
            info!("Failed to load config from environment, using defaults");
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

async fn load_jobs(path: &Path) -> Result<Vec<JobDescriptor>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read jobs file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse jobs file {}", path.display()))
}
