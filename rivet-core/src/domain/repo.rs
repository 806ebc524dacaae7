//! Repo domain types

use serde::{Deserialize, Serialize};

/// Source repository that owns builds and pipelines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: i64,
    pub org: String,
    pub name: String,
    pub active: bool,
}

impl Repo {
    pub fn new(org: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            org: org.into(),
            name: name.into(),
            active: true,
        }
    }

    /// `org/name` form used in logs and CLI output
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}
