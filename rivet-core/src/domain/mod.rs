//! Core domain types
//!
//! This module contains the records owned by the Rivet control plane.
//! Every record carries an `id` assigned by the storage backend on insert;
//! an `id` of `0` means the record has not been persisted yet.

pub mod build;
pub mod log;
pub mod pipeline;
pub mod repo;
pub mod worker;
