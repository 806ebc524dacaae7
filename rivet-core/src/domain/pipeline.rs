//! Pipeline domain types

use serde::{Deserialize, Serialize};

/// Pipeline definition captured for a single commit of a repo
///
/// `data` holds the raw configuration bytes. While a record sits in the
/// database the bytes may be compressed; `compressed` and
/// `compression_level` describe how they were stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: i64,
    pub repo_id: i64,
    pub commit: String,
    pub compressed: bool,
    pub compression_level: i32,
    pub data: Vec<u8>,
}

impl Pipeline {
    pub fn new(repo_id: i64, commit: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            id: 0,
            repo_id,
            commit: commit.into(),
            compressed: false,
            compression_level: 0,
            data: data.into(),
        }
    }
}
