//! Run context
//!
//! Identity of the workflow run the executor is working for. Passed
//! explicitly to every entry point instead of being read from the process
//! environment.

use std::path::{Path, PathBuf};

/// Workflow run identity and workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub workflow_uuid: String,
    pub workspace: PathBuf,
}

impl RunContext {
    pub fn new(workflow_uuid: impl Into<String>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            workflow_uuid: workflow_uuid.into(),
            workspace: workspace.into(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Workspace path as sent to the job controller
    pub fn workspace_str(&self) -> String {
        self.workspace.to_string_lossy().to_string()
    }
}
