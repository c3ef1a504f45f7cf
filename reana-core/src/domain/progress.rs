//! Workflow progress messages
//!
//! A progress message is a snapshot, per bucket, of how many jobs are in that
//! bucket and which ones. Only the buckets that are set are serialized.

use serde::{Deserialize, Serialize};

use crate::domain::job::JobId;

/// Progress bucket a set of jobs is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBucket {
    Total,
    Running,
    Finished,
    Failed,
}

/// Count and identifiers of the jobs in one bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub total: usize,
    pub job_ids: Vec<String>,
}

impl BucketSummary {
    pub fn single(job_id: &JobId) -> Self {
        Self {
            total: 1,
            job_ids: vec![job_id.to_string()],
        }
    }

    /// Only a count, no identifiers (used for the planned total)
    pub fn count(total: usize) -> Self {
        Self {
            total,
            job_ids: Vec::new(),
        }
    }
}

/// Progress snapshot attached to a workflow-status event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total: Option<BucketSummary>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub running: Option<BucketSummary>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub finished: Option<BucketSummary>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failed: Option<BucketSummary>,
}

impl Progress {
    /// Progress with a single bucket set
    pub fn with_bucket(bucket: ProgressBucket, summary: BucketSummary) -> Self {
        let mut progress = Self::default();
        *progress.bucket_mut(bucket) = Some(summary);
        progress
    }

    /// Progress for one job moving into `bucket`
    pub fn job(bucket: ProgressBucket, job_id: &JobId) -> Self {
        Self::with_bucket(bucket, BucketSummary::single(job_id))
    }

    pub fn bucket(&self, bucket: ProgressBucket) -> Option<&BucketSummary> {
        match bucket {
            ProgressBucket::Total => self.total.as_ref(),
            ProgressBucket::Running => self.running.as_ref(),
            ProgressBucket::Finished => self.finished.as_ref(),
            ProgressBucket::Failed => self.failed.as_ref(),
        }
    }

    fn bucket_mut(&mut self, bucket: ProgressBucket) -> &mut Option<BucketSummary> {
        match bucket {
            ProgressBucket::Total => &mut self.total,
            ProgressBucket::Running => &mut self.running,
            ProgressBucket::Finished => &mut self.finished,
            ProgressBucket::Failed => &mut self.failed,
        }
    }
}
