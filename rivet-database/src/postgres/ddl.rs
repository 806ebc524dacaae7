//! PostgreSQL schema definitions

use crate::constants::{TABLE_BUILDS, TABLE_LOGS, TABLE_PIPELINES, TABLE_REPOS, TABLE_WORKERS};
use crate::schema::{IndexDef, Schema, TableDef};

pub const CREATE_REPO_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
repos (
    id      BIGSERIAL PRIMARY KEY,
    org     VARCHAR(250) NOT NULL,
    name    VARCHAR(250) NOT NULL,
    active  BOOLEAN NOT NULL DEFAULT TRUE,
    UNIQUE(org, name)
)
"#;

pub const CREATE_BUILD_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
builds (
    id        BIGSERIAL PRIMARY KEY,
    repo_id   BIGINT NOT NULL REFERENCES repos(id),
    number    BIGINT NOT NULL,
    status    VARCHAR(50) NOT NULL,
    event     VARCHAR(250) NOT NULL DEFAULT '',
    branch    VARCHAR(500) NOT NULL DEFAULT '',
    created   BIGINT NOT NULL DEFAULT 0,
    started   BIGINT NOT NULL DEFAULT 0,
    finished  BIGINT NOT NULL DEFAULT 0,
    UNIQUE(repo_id, number)
)
"#;

pub const CREATE_PIPELINE_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
pipelines (
    id                 BIGSERIAL PRIMARY KEY,
    repo_id            BIGINT NOT NULL REFERENCES repos(id),
    "commit"           VARCHAR(500) NOT NULL,
    compressed         BOOLEAN NOT NULL DEFAULT FALSE,
    compression_level  INTEGER NOT NULL DEFAULT 0,
    data               BYTEA NOT NULL,
    UNIQUE(repo_id, "commit")
)
"#;

pub const CREATE_WORKER_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
workers (
    id               BIGSERIAL PRIMARY KEY,
    hostname         VARCHAR(250) NOT NULL UNIQUE,
    address          VARCHAR(250) NOT NULL UNIQUE,
    routes           TEXT NOT NULL DEFAULT '[]',
    active           BOOLEAN NOT NULL DEFAULT TRUE,
    last_checked_in  BIGINT NOT NULL DEFAULT 0,
    build_limit      BIGINT NOT NULL DEFAULT 0
)
"#;

pub const CREATE_LOG_TABLE: &str = r#"
CREATE TABLE
IF NOT EXISTS
logs (
    id          BIGSERIAL PRIMARY KEY,
    build_id    BIGINT NOT NULL REFERENCES builds(id),
    repo_id     BIGINT NOT NULL REFERENCES repos(id),
    service_id  BIGINT UNIQUE,
    step_id     BIGINT UNIQUE,
    data        BYTEA NOT NULL
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
