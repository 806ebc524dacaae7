use sqlx::{
    PgPool, SqlitePool,
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Driver;

/// Already-connected pool for one of the supported backends
#[derive(Debug, Clone)]
pub enum DatabasePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DatabasePool {
    pub fn driver(&self) -> Driver {
        match self {
            DatabasePool::Postgres(_) => Driver::Postgres,
            DatabasePool::Sqlite(_) => Driver::Sqlite,
        }
    }
}

impl From<PgPool> for DatabasePool {
    fn from(pool: PgPool) -> Self {
        DatabasePool::Postgres(pool)
    }
}

impl From<SqlitePool> for DatabasePool {
    fn from(pool: SqlitePool) -> Self {
        DatabasePool::Sqlite(pool)
    }
}

pub async fn create_pool(
    driver: Driver,
    address: &str,
    max_connections: u32,
) -> Result<DatabasePool, sqlx::Error> {
    match driver {
        Driver::Postgres => PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(address)
            .await
            .map(DatabasePool::Postgres),
        Driver::Sqlite => {
            let options = SqliteConnectOptions::from_str(address)?
                .create_if_missing(true)
                .foreign_keys(true);

            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect_with(options)
                .await
                .map(DatabasePool::Sqlite)
        }
    }
}

/// Single-connection in-memory SQLite pool.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// is pinned to one connection that never expires.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}
