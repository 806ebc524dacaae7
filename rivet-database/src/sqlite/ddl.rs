//! SQLite schema definitions

use crate::constants::{TABLE_BUILDS, TABLE_LOGS, TABLE_PIPELINES, TABLE_REPOS, TABLE_WORKERS};
use crate::schema::{IndexDef, Schema, TableDef};

pub const CREATE_REPO_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
repos (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    org     TEXT NOT NULL,
    name    TEXT NOT NULL,
    active  BOOLEAN NOT NULL DEFAULT 1,
    UNIQUE(org, name)
)
"#;

pub const CREATE_BUILD_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
builds (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    repo_id   INTEGER NOT NULL REFERENCES repos(id),
    number    INTEGER NOT NULL,
    status    TEXT NOT NULL,
    event     TEXT NOT NULL DEFAULT '',
    branch    TEXT NOT NULL DEFAULT '',
    created   INTEGER NOT NULL DEFAULT 0,
    started   INTEGER NOT NULL DEFAULT 0,
    finished  INTEGER NOT NULL DEFAULT 0,
    UNIQUE(repo_id, number)
)
"#;

pub const CREATE_PIPELINE_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
pipelines (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    repo_id            INTEGER NOT NULL REFERENCES repos(id),
    "commit"           TEXT NOT NULL,
    compressed         BOOLEAN NOT NULL DEFAULT 0,
    compression_level  INTEGER NOT NULL DEFAULT 0,
    data               BLOB NOT NULL,
    UNIQUE(repo_id, "commit")
)
"#;

pub const CREATE_WORKER_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
workers (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    hostname         TEXT NOT NULL UNIQUE,
    address          TEXT NOT NULL UNIQUE,
    routes           TEXT NOT NULL DEFAULT '[]',
    active           BOOLEAN NOT NULL DEFAULT 1,
    last_checked_in  INTEGER NOT NULL DEFAULT 0,
    build_limit      INTEGER NOT NULL DEFAULT 0
)
"#;

pub const CREATE_LOG_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
logs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    build_id    INTEGER NOT NULL REFERENCES builds(id),
    repo_id     INTEGER NOT NULL REFERENCES repos(id),
    service_id  INTEGER,
    step_id     INTEGER,
    data        BLOB NOT NULL,
    UNIQUE(step_id),
    UNIQUE(service_id)
)
"#;

pub static SCHEMA: Schema = Schema {
    tables: &[
        TableDef {
            name: TABLE_REPOS,
            references: &[],
            ddl: CREATE_REPO_TABLE,
        },
        TableDef {
            name: TABLE_BUILDS,
            references: &[TABLE_REPOS],
            ddl: CREATE_BUILD_TABLE,
        },
        TableDef {
            name: TABLE_PIPELINES,
            references: &[TABLE_REPOS],
            ddl: CREATE_PIPELINE_TABLE,
        },
        TableDef {
            name: TABLE_WORKERS,
            references: &[],
            ddl: CREATE_WORKER_TABLE,
        },
        TableDef {
            name: TABLE_LOGS,
            references: &[TABLE_BUILDS, TABLE_REPOS],
            ddl: CREATE_LOG_TABLE,
        },
    ],
    indexes: &[
        IndexDef {
            name: "builds_repo_id",
            table: TABLE_BUILDS,
            ddl: "CREATE INDEX IF NOT EXISTS builds_repo_id ON builds (repo_id)",
        },
        IndexDef {
            name: "builds_status",
            table: TABLE_BUILDS,
            ddl: "CREATE INDEX IF NOT EXISTS builds_status ON builds (status)",
        },
        IndexDef {
            name: "builds_created",
            table: TABLE_BUILDS,
            ddl: "CREATE INDEX IF NOT EXISTS builds_created ON builds (created)",
        },
        IndexDef {
            name: "pipelines_repo_id",
            table: TABLE_PIPELINES,
            ddl: "CREATE INDEX IF NOT EXISTS pipelines_repo_id ON pipelines (repo_id)",
        },
        IndexDef {
            name: "logs_build_id",
            table: TABLE_LOGS,
            ddl: "CREATE INDEX IF NOT EXISTS logs_build_id ON logs (build_id)",
        },
    ],
};
