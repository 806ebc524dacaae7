//! Build domain types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single build of a repo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: i64,
    pub repo_id: i64,
    /// Per-repo sequence number, unique together with `repo_id`
    pub number: i64,
    pub status: BuildStatus,
    pub event: String,
    pub branch: String,
    /// Unix seconds
    pub created: i64,
    pub started: i64,
    pub finished: i64,
}

impl Build {
    pub fn new(repo_id: i64, number: i64, status: BuildStatus) -> Self {
        Self {
            id: 0,
            repo_id,
            number,
            status,
            event: String::new(),
            branch: String::new(),
            created: chrono::Utc::now().timestamp(),
            started: 0,
            finished: 0,
        }
    }
}

/// Build execution status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    #[default]
    Pending,
    Running,
    Success,
    Failed,
    Killed,
    Canceled,
    Error,
}

impl BuildStatus {
    pub const ALL: [BuildStatus; 7] = [
        BuildStatus::Pending,
        BuildStatus::Running,
        BuildStatus::Success,
        BuildStatus::Failed,
        BuildStatus::Killed,
        BuildStatus::Canceled,
        BuildStatus::Error,
    ];

    /// Lowercase name as stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Pending => "pending",
            BuildStatus::Running => "running",
            BuildStatus::Success => "success",
            BuildStatus::Failed => "failed",
            BuildStatus::Killed => "killed",
            BuildStatus::Canceled => "canceled",
            BuildStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl std::fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown build status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for BuildStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
