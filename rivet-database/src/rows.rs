//! Database row types shared by every dialect
//!
//! Column types are chosen so a row decodes the same way on PostgreSQL
//! and SQLite: ids and times are 64-bit integers, payloads are raw bytes
//! and worker routes are a JSON array in a text column.

use std::collections::BTreeSet;

use rivet_core::{Build, Log, Pipeline, Repo, Worker};

use crate::error::{DatabaseError, Result};

#[derive(sqlx::FromRow)]
pub(crate) struct RepoRow {
    id: i64,
    org: String,
    name: String,
    active: bool,
}

impl From<RepoRow> for Repo {
    fn from(row: RepoRow) -> Self {
        Repo {
            id: row.id,
            org: row.org,
            name: row.name,
            active: row.active,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BuildRow {
    id: i64,
    repo_id: i64,
    number: i64,
    status: String,
    event: String,
    branch: String,
    created: i64,
    started: i64,
    finished: i64,
}

impl TryFrom<BuildRow> for Build {
    type Error = DatabaseError;

    fn try_from(row: BuildRow) -> Result<Self> {
        let status = row
            .status
            .parse()
            .map_err(|e| DatabaseError::integrity("build", e))?;

        Ok(Build {
            id: row.id,
            repo_id: row.repo_id,
            number: row.number,
            status,
            event: row.event,
            branch: row.branch,
            created: row.created,
            started: row.started,
            finished: row.finished,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PipelineRow {
    id: i64,
    repo_id: i64,
    commit: String,
    compressed: bool,
    compression_level: i32,
    data: Vec<u8>,
}

impl From<PipelineRow> for Pipeline {
    fn from(row: PipelineRow) -> Self {
        Pipeline {
            id: row.id,
            repo_id: row.repo_id,
            commit: row.commit,
            compressed: row.compressed,
            compression_level: row.compression_level,
            data: row.data,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct WorkerRow {
    id: i64,
    hostname: String,
    address: String,
    routes: String,
    active: bool,
    last_checked_in: i64,
    build_limit: i64,
}

impl TryFrom<WorkerRow> for Worker {
    type Error = DatabaseError;

    fn try_from(row: WorkerRow) -> Result<Self> {
        let routes: BTreeSet<String> = serde_json::from_str(&row.routes)
            .map_err(|e| DatabaseError::integrity("worker", format!("routes: {e}")))?;

        Ok(Worker {
            id: row.id,
            hostname: row.hostname,
            address: row.address,
            routes,
            active: row.active,
            last_checked_in: row.last_checked_in,
            build_limit: row.build_limit,
        })
    }
}

/// Serialize worker routes for the `routes` text column
pub(crate) fn encode_routes(routes: &BTreeSet<String>) -> Result<String> {
    serde_json::to_string(routes).map_err(|e| DatabaseError::integrity("worker", format!("routes: {e}")))
}

#[derive(sqlx::FromRow)]
pub(crate) struct LogRow {
    id: i64,
    build_id: i64,
    repo_id: i64,
    service_id: Option<i64>,
    step_id: Option<i64>,
    data: Vec<u8>,
}

impl From<LogRow> for Log {
    fn from(row: LogRow) -> Self {
        Log {
            id: row.id,
            build_id: row.build_id,
            repo_id: row.repo_id,
            service_id: row.service_id,
            step_id: row.step_id,
            data: row.data,
        }
    }
}
