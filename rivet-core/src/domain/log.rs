//! Log domain types

use serde::{Deserialize, Serialize};

/// Output captured from a single step or service of a build
///
/// A log belongs to exactly one of `service_id` or `step_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: i64,
    pub build_id: i64,
    pub repo_id: i64,
    pub service_id: Option<i64>,
    pub step_id: Option<i64>,
    pub data: Vec<u8>,
}

impl Log {
    pub fn for_step(build_id: i64, repo_id: i64, step_id: i64) -> Self {
        Self {
            build_id,
            repo_id,
            step_id: Some(step_id),
            ..Self::default()
        }
    }

    pub fn for_service(build_id: i64, repo_id: i64, service_id: i64) -> Self {
        Self {
            build_id,
            repo_id,
            service_id: Some(service_id),
            ..Self::default()
        }
    }

    /// Append raw bytes to the log payload
    pub fn append(&mut self, chunk: &[u8]) {
        self.data.extend_from_slice(chunk);
    }
}
