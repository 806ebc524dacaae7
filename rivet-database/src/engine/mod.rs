//! Engine Interface
//!
//! The single persistence contract consumed by the rest of the control
//! plane. An [`Engine`] owns exactly one dialect adapter, chosen at
//! construction from the pool it is handed, and routes every call through
//! the record transformer before it reaches the adapter.

mod build;
mod log;
mod pipeline;
mod repo;
mod worker;

#[cfg(test)]
mod scenarios;

use crate::config::{Driver, EngineConfig};
use crate::db::DatabasePool;
use crate::error::{DatabaseError, Result};
use crate::filter::CountQuery;
use crate::postgres::PostgresStore;
use crate::schema::SchemaManager;
use crate::sqlite::SqliteStore;
use crate::store::Store;

/// Closed set of supported backends
enum Backend {
    Postgres(PostgresStore),
    Sqlite(SqliteStore),
}

/// Storage engine for repos, builds, pipelines, workers and logs
pub struct Engine {
    config: EngineConfig,
    backend: Backend,
}

impl Engine {
    /// Create an engine over an already-connected pool and bring the
    /// schema up unless `config.skip_creation` is set.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Config`] when the configuration is invalid or
    /// names a different driver than the pool, and [`DatabaseError::Schema`]
    /// when any DDL statement fails.
    pub async fn new(config: EngineConfig, pool: impl Into<DatabasePool>) -> Result<Self> {
        config.validate()?;

        let pool = pool.into();
        if pool.driver() != config.driver {
            return Err(DatabaseError::Config(format!(
                "configured driver {} does not match {} pool",
                config.driver,
                pool.driver()
            )));
        }

        let backend = match pool {
            DatabasePool::Postgres(pool) => Backend::Postgres(PostgresStore::new(pool)),
            DatabasePool::Sqlite(pool) => Backend::Sqlite(SqliteStore::new(pool)),
        };
        let engine = Self { config, backend };

        if engine.config.skip_creation {
            tracing::warn!("skipping creation of database tables and indexes");
        } else {
            SchemaManager::new(engine.store()).apply().await?;
        }

        tracing::debug!(
            driver = %engine.config.driver,
            compression_level = engine.config.compression_level,
            "database engine initialized"
        );

        Ok(engine)
    }

    pub(crate) fn store(&self) -> &dyn Store {
        match &self.backend {
            Backend::Postgres(store) => store,
            Backend::Sqlite(store) => store,
        }
    }

    /// Backend this engine was constructed for
    pub fn driver(&self) -> Driver {
        self.config.driver
    }

    /// Configuration the engine was constructed with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Close every connection held by the underlying pool
    pub async fn close(&self) {
        self.store().close().await;
    }

    async fn count(&self, query: CountQuery) -> Result<i64> {
        tracing::trace!(sql = query.sql(), binds = query.binds().len(), "counting rows");
        self.store().count(&query).await
    }
}

/// Turn an empty lookup into a not-found error
fn found<T>(entity: &'static str, key: impl std::fmt::Display, record: Option<T>) -> Result<T> {
    record.ok_or_else(|| DatabaseError::not_found(entity, key))
}

/// Turn a statement that touched no rows into a not-found error
fn affected(entity: &'static str, id: i64, rows: u64) -> Result<()> {
    if rows == 0 {
        return Err(DatabaseError::not_found(entity, id));
    }
    Ok(())
}
