//! Table names shared by the DDL, DML and count statements

pub const TABLE_REPOS: &str = "repos";
pub const TABLE_BUILDS: &str = "builds";
pub const TABLE_PIPELINES: &str = "pipelines";
pub const TABLE_WORKERS: &str = "workers";
pub const TABLE_LOGS: &str = "logs";
