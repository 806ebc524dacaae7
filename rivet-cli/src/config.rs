//! Configuration module
//!
//! Connection settings collected from flags and `RIVET_DATABASE_*` variables.

use anyhow::{Context, Result};
use rivet_database::{Driver, Engine, EngineConfig, create_pool};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub driver: Driver,
    pub address: String,
    pub compression_level: i32,
    pub skip_creation: bool,
    pub max_connections: u32,
}

impl Config {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.driver)
            .with_compression_level(self.compression_level)
            .with_skip_creation(self.skip_creation)
    }

    /// Connect to the configured database and start an engine over it
    pub async fn connect(&self) -> Result<Engine> {
        tracing::info!(driver = %self.driver, "connecting to database");

        let pool = create_pool(self.driver, &self.address, self.max_connections)
            .await
            .with_context(|| format!("unable to connect to {} database", self.driver))?;

        Engine::new(self.engine_config(), pool)
            .await
            .context("unable to initialize database engine")
    }
}
