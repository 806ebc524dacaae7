//! SQLite dialect adapter

mod ddl;
mod dml;

use sqlx::SqlitePool;

use crate::config::Driver;
use crate::store::impl_store;

pub use ddl::SCHEMA;

/// [`Store`](crate::store::Store) backed by a SQLite pool.
///
/// The pool must be opened with foreign keys enabled, as
/// [`create_pool`](crate::db::create_pool) does.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl_store!(SqliteStore, sqlx::Sqlite, Driver::Sqlite, ddl::SCHEMA, dml);
