//! Rivet Core
//!
//! Core types for the Rivet CI/CD control plane.
//!
//! This crate contains the domain records persisted by the storage engine:
//! repos, builds, pipelines, workers and step/service logs.

pub mod domain;

pub use domain::build::{Build, BuildStatus};
pub use domain::log::Log;
pub use domain::pipeline::Pipeline;
pub use domain::repo::Repo;
pub use domain::worker::Worker;
