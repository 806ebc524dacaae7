//! Engine Configuration
//!
//! Explicit configuration handed to [`Engine::new`](crate::Engine::new).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{DatabaseError, Result};
use crate::transform::COMPRESSION_LEVELS;

/// Compression level used when none is configured
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Supported relational backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Postgres,
    #[default]
    Sqlite,
}

impl Driver {
    /// Render the bind placeholder for the 1-based parameter `index`
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Driver::Postgres => format!("${index}"),
            Driver::Sqlite => "?".to_string(),
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Driver::Postgres => write!(f, "postgres"),
            Driver::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Driver {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Driver::Postgres),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(DatabaseError::Config(format!(
                "unsupported database driver '{other}'"
            ))),
        }
    }
}

/// Storage engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backend kind; must match the pool handed to the engine
    pub driver: Driver,

    /// zstd level applied to pipeline payloads (higher = smaller, slower)
    pub compression_level: i32,

    /// Skip schema creation at startup
    pub skip_creation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            driver: Driver::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            skip_creation: false,
        }
    }
}

impl EngineConfig {
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            ..Self::default()
        }
    }

    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_skip_creation(mut self, skip: bool) -> Self {
        self.skip_creation = skip;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !COMPRESSION_LEVELS.contains(&self.compression_level) {
            return Err(DatabaseError::Config(format!(
                "compression level {} is outside {}..={}",
                self.compression_level,
                COMPRESSION_LEVELS.start(),
                COMPRESSION_LEVELS.end()
            )));
        }

        Ok(())
    }
}
