//! Rivet Database
//!
//! Dialect-portable storage engine for the Rivet control plane.
//!
//! This crate contains:
//! - [`Engine`]: the persistence contract for repos, builds, pipelines, workers and logs
//! - [`schema`]: idempotent schema creation in dependency order
//! - [`transform`]: mandatory-field validation and payload compression
//! - [`filter`]: enumerated filters rendered into parameterized counts
//! - [`postgres`] and [`sqlite`]: one adapter per supported backend

pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod filter;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod transform;

mod rows;

pub use config::{Driver, EngineConfig};
pub use db::{DatabasePool, create_memory_pool, create_pool};
pub use engine::Engine;
pub use error::{DatabaseError, Result};
pub use filter::{BuildFilter, BuildScope, CountQuery};
