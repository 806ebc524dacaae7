//! PostgreSQL dialect adapter

mod ddl;
mod dml;

use sqlx::PgPool;

use crate::config::Driver;
use crate::store::impl_store;

pub use ddl::SCHEMA;

/// [`Store`](crate::store::Store) backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl_store!(PostgresStore, sqlx::Postgres, Driver::Postgres, ddl::SCHEMA, dml);
