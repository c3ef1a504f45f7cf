//! Workflow run status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a whole workflow run
///
/// The numeric codes are the ones understood by the workflow controller
/// consuming status events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Created,
    Running,
    Finished,
    Failed,
    Deleted,
    Stopped,
    Queued,
    Pending,
}

impl RunStatus {
    /// Wire code of this status
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Created => 0,
            RunStatus::Running => 1,
            RunStatus::Finished => 2,
            RunStatus::Failed => 3,
            RunStatus::Deleted => 4,
            RunStatus::Stopped => 5,
            RunStatus::Queued => 6,
            RunStatus::Pending => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RunStatus::Created),
            1 => Some(RunStatus::Running),
            2 => Some(RunStatus::Finished),
            3 => Some(RunStatus::Failed),
            4 => Some(RunStatus::Deleted),
            5 => Some(RunStatus::Stopped),
            6 => Some(RunStatus::Queued),
            7 => Some(RunStatus::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStatus::Created => "created",
            RunStatus::Running => "running",
            RunStatus::Finished => "finished",
            RunStatus::Failed => "failed",
            RunStatus::Deleted => "deleted",
            RunStatus::Stopped => "stopped",
            RunStatus::Queued => "queued",
            RunStatus::Pending => "pending",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in 0..8 {
            let status = RunStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(RunStatus::from_code(8), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(RunStatus::Failed.to_string(), "failed");
        assert_eq!(RunStatus::Running.to_string(), "running");
    }
}
