//! SQLite statement text

pub const SELECT_REPO: &str = "SELECT id, org, name, active FROM repos WHERE id = ?";
pub const SELECT_REPO_FOR_ORG: &str =
    "SELECT id, org, name, active FROM repos WHERE org = ? AND name = ?";
pub const INSERT_REPO: &str =
    "INSERT INTO repos (org, name, active) VALUES (?, ?, ?) RETURNING id";
pub const UPDATE_REPO: &str = "UPDATE repos SET org = ?, name = ?, active = ? WHERE id = ?";
pub const DELETE_REPO: &str = "DELETE FROM repos WHERE id = ?";

pub const SELECT_BUILD: &str = r#"
SELECT id, repo_id, number, status, event, branch, created, started, finished
FROM builds
WHERE id = ?
"#;
pub const SELECT_BUILD_FOR_REPO: &str = r#"
SELECT id, repo_id, number, status, event, branch, created, started, finished
FROM builds
WHERE repo_id = ? AND number = ?
"#;
pub const LIST_BUILDS_FOR_REPO: &str = r#"
SELECT id, repo_id, number, status, event, branch, created, started, finished
FROM builds
WHERE repo_id = ?
ORDER BY number DESC
"#;
pub const INSERT_BUILD: &str = r#"
INSERT INTO builds (repo_id, number, status, event, branch, created, started, finished)
VALUES (?, ?, ?, ?, ?, ?, ?, ?)
RETURNING id
"#;
pub const UPDATE_BUILD: &str = r#"
UPDATE builds
SET repo_id = ?, number = ?, status = ?, event = ?, branch = ?,
    created = ?, started = ?, finished = ?
WHERE id = ?
"#;
pub const DELETE_BUILD: &str = "DELETE FROM builds WHERE id = ?";

pub const SELECT_PIPELINE: &str = r#"
SELECT id, repo_id, "commit", compressed, compression_level, data
FROM pipelines
WHERE id = ?
"#;
pub const SELECT_PIPELINE_FOR_REPO: &str = r#"
SELECT id, repo_id, "commit", compressed, compression_level, data
FROM pipelines
WHERE repo_id = ? AND "commit" = ?
"#;
pub const INSERT_PIPELINE: &str = r#"
INSERT INTO pipelines (repo_id, "commit", compressed, compression_level, data)
VALUES (?, ?, ?, ?, ?)
RETURNING id
"#;
pub const UPDATE_PIPELINE: &str = r#"
UPDATE pipelines
SET repo_id = ?, "commit" = ?, compressed = ?, compression_level = ?, data = ?
WHERE id = ?
"#;
pub const DELETE_PIPELINE: &str = "DELETE FROM pipelines WHERE id = ?";

pub const SELECT_WORKER: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
WHERE id = ?
"#;
pub const SELECT_WORKER_BY_HOSTNAME: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
WHERE hostname = ?
"#;
pub const SELECT_WORKER_BY_ADDRESS: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
WHERE address = ?
"#;
pub const LIST_WORKERS: &str = r#"
SELECT id, hostname, address, routes, active, last_checked_in, build_limit
FROM workers
ORDER BY hostname ASC
"#;
pub const INSERT_WORKER: &str = r#"
INSERT INTO workers (hostname, address, routes, active, last_checked_in, build_limit)
VALUES (?, ?, ?, ?, ?, ?)
RETURNING id
"#;
pub const UPDATE_WORKER: &str = r#"
UPDATE workers
SET hostname = ?, address = ?, routes = ?, active = ?,
    last_checked_in = ?, build_limit = ?
WHERE id = ?
"#;
pub const DELETE_WORKER: &str = "DELETE FROM workers WHERE id = ?";

pub const SELECT_LOG: &str =
    "SELECT id, build_id, repo_id, service_id, step_id, data FROM logs WHERE id = ?";
pub const SELECT_LOG_FOR_STEP: &str =
    "SELECT id, build_id, repo_id, service_id, step_id, data FROM logs WHERE step_id = ?";
pub const SELECT_LOG_FOR_SERVICE: &str =
    "SELECT id, build_id, repo_id, service_id, step_id, data FROM logs WHERE service_id = ?";
pub const INSERT_LOG: &str = r#"
INSERT INTO logs (build_id, repo_id, service_id, step_id, data)
VALUES (?, ?, ?, ?, ?)
RETURNING id
"#;
pub const UPDATE_LOG: &str = r#"
UPDATE logs
SET build_id = ?, repo_id = ?, service_id = ?, step_id = ?, data = ?
WHERE id = ?
"#;
pub const DELETE_LOG: &str = "DELETE FROM logs WHERE id = ?";
