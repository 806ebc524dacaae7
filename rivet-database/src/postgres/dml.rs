//! PostgreSQL statement text

pub const SELECT_REPO: &str = "SELECT id, org, name, active FROM repos WHERE id = $1";
pub const SELECT_REPO_FOR_ORG: &str =
    "SELECT id, org, name, active FROM repos WHERE org = $1 AND name = $2";
pub const INSERT_REPO: &str =
    "INSERT INTO repos (org, name, active) VALUES ($1, $2, $3) RETURNING id";
pub const UPDATE_REPO: &str = "UPDATE repos SET org = $1, name = $2, active = $3 WHERE id = $4";
pub const DELETE_REPO: &str = "DELETE FROM repos WHERE id = $1";

pub const SELECT_BUILD: &str = r#"
SELECT id, repo_id, number, status, event, branch, created, started, finished
FROM builds
WHERE id = $1
"#;
pub const SELECT_BUILD_FOR_REPO: &str = r#"
SELECT id, repo_id, number, status, event, branch, created, started, finished
FROM builds
WHERE repo_id = $1 AND number = $2
"#;
pub const LIST_BUILDS_FOR_REPO: &str = r#"
SELECT id, repo_id, number, status, event, branch, created, started, finished
FROM builds
WHERE repo_id = $1
ORDER BY number DESC
"#;
pub const INSERT_BUILD: &str = r#"
INSERT INTO builds (repo_id, number, status, event, branch, created, started, finished)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
RETURNING id
"#;
pub const UPDATE_BUILD: &str = r#"
UPDATE builds
SET repo_id = $1, number = $2, status = $3, event = $4, branch = $5,
    created = $6, started = $7, finished = $8
WHERE id = $9
"#;
pub const DELETE_BUILD: &str = "DELETE FROM builds WHERE id = $1";

pub const SELECT_PIPELINE: &str = r#"
SELECT id, repo_id, "commit", compressed, compression_level, data
FROM pipelines
WHERE id = $1
"#;
pub const SELECT_PIPELINE_FOR_REPO: &str = r#"
SELECT id, repo_id, "commit", compressed, compression_level, data
FROM pipelines
WHERE repo_id = $1 AND "commit" = $2
"#;
pub const INSERT_PIPELINE: &str = r#"
INSERT INTO pipelines (repo_id, "commit", compressed, compression_level, data)
VALUES ($1, $2, $3, $4, $5)
RETURNING id
"#;
pub const UPDATE_PIPELINE: &str = r#"
UPDATE pipelines
SET repo_id = $1, "commit" = $2, compressed = $3, compression_level = $4, data = $5
WHERE id = $6
"#;
pub const DELETE_PIPELINE: &str = "DELETE FROM pipelines WHERE id = $1";

pub const SELECT_WORKER: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
WHERE id = $1
"#;
pub const SELECT_WORKER_BY_HOSTNAME: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
WHERE hostname = $1
"#;
pub const SELECT_WORKER_BY_ADDRESS: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
WHERE address = $1
"#;
pub const LIST_WORKERS: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
ORDER BY hostname ASC
"#;
pub const INSERT_WORKER: &str = r#"
INSERT INTO workers (hostname, address, routes, active, last_checked_in, build_limit)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id
"#;
pub const UPDATE_WORKER: &str = r#"
UPDATE workers
SET hostname = $1, address = $2, routes = $3, active = $4,
    last_checked_in = $5, build_limit = $6
WHERE id = $7
"#;
pub const DELETE_WORKER: &str = "DELETE FROM workers WHERE id = $1";

pub const SELECT_LOG: &str =
    "SELECT id, build_id, repo_id, service_id, step_id, data FROM logs WHERE id = $1";
pub const SELECT_LOG_FOR_STEP: &str =
    "SELECT id, build_id, repo_id, service_id, step_id, data FROM logs WHERE step_id = $1";
pub const SELECT_LOG_FOR_SERVICE: &str =
    "SELECT id, build_id, repo_id, service_id, step_id, data FROM logs WHERE service_id = $1";
pub const INSERT_LOG: &str = r#"
INSERT INTO logs (build_id, repo_id, service_id, step_id, data)
VALUES ($1, $2, $3, $4, $5)
RETURNING id
"#;
pub const UPDATE_LOG: &str = r#"
UPDATE logs
SET build_id = $1, repo_id = $2, service_id = $3, step_id = $4, data = $5
WHERE id = $6
"#;
pub const DELETE_LOG: &str = "DELETE FROM logs WHERE id = $1";
