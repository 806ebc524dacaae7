//! Worker domain model
//!
//! Represents a worker host that executes builds for the control plane.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A registered build worker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,

    /// Host name, unique across workers
    pub hostname: String,

    /// Reachable address, unique across workers
    pub address: String,

    /// Queue routes this worker pulls builds from
    pub routes: BTreeSet<String>,

    /// Whether the worker accepts new builds
    pub active: bool,

    /// Last check-in time in Unix seconds
    pub last_checked_in: i64,

    /// Maximum number of concurrent builds
    pub build_limit: i64,
}

impl Worker {
    pub fn new(hostname: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: 0,
            hostname: hostname.into(),
            address: address.into(),
            routes: BTreeSet::new(),
            active: true,
            last_checked_in: 0,
            build_limit: 1,
        }
    }

    /// Stamp the current time as the last check-in
    pub fn check_in(&mut self) {
        self.last_checked_in = chrono::Utc::now().timestamp();
    }
}
