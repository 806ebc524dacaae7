//! Record Transformer
//!
//! Validation of mandatory fields and reversible compression of payload
//! bytes, applied at the storage boundary before any statement is issued.

use std::io::Cursor;
use std::ops::RangeInclusive;

use rivet_core::{Build, Log, Pipeline, Repo, Worker};

use crate::error::{DatabaseError, Result};

/// zstd levels accepted for stored payloads
pub const COMPRESSION_LEVELS: RangeInclusive<i32> = 1..=22;

/// Mandatory-field check run before `create` and `update`.
///
/// Implementations report the first failing field.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Records whose payload is stored compressed
pub trait Compress {
    /// Compress the payload in place and mark the record as compressed.
    /// A record that is already compressed is left untouched.
    fn compress(&mut self, level: i32) -> Result<()>;

    /// Exact inverse of [`Compress::compress`]; a no-op for uncompressed records.
    fn decompress(&mut self) -> Result<()>;
}

fn non_empty(entity: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DatabaseError::Validation {
            entity,
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

fn positive(entity: &'static str, field: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(DatabaseError::Validation {
            entity,
            field,
            reason: "must be set",
        });
    }
    Ok(())
}

/// `update_*` needs the primary key of an existing row
pub(crate) fn require_id(entity: &'static str, id: i64) -> Result<()> {
    positive(entity, "id", id)
}

impl Validate for Repo {
    fn validate(&self) -> Result<()> {
        non_empty("repo", "org", &self.org)?;
        non_empty("repo", "name", &self.name)
    }
}

impl Validate for Build {
    fn validate(&self) -> Result<()> {
        positive("build", "repo_id", self.repo_id)?;
        positive("build", "number", self.number)
    }
}

impl Validate for Pipeline {
    fn validate(&self) -> Result<()> {
        positive("pipeline", "repo_id", self.repo_id)?;
        non_empty("pipeline", "commit", &self.commit)
    }
}

impl Validate for Worker {
    fn validate(&self) -> Result<()> {
        non_empty("worker", "hostname", &self.hostname)?;
        non_empty("worker", "address", &self.address)
    }
}

impl Validate for Log {
    fn validate(&self) -> Result<()> {
        positive("log", "build_id", self.build_id)?;
        positive("log", "repo_id", self.repo_id)?;

        match (self.service_id, self.step_id) {
            (None, None) => Err(DatabaseError::Validation {
                entity: "log",
                field: "step_id",
                reason: "either step_id or service_id must be set",
            }),
            (Some(_), Some(_)) => Err(DatabaseError::Validation {
                entity: "log",
                field: "service_id",
                reason: "step_id and service_id are mutually exclusive",
            }),
            _ => Ok(()),
        }
    }
}

/// Compress bytes with zstd at `level`.
///
/// # Errors
///
/// Returns [`DatabaseError::Config`] for a level outside [`COMPRESSION_LEVELS`]
/// and [`DatabaseError::Integrity`] if the encoder fails.
pub fn compress(data: &[u8], level: i32) -> Result<Vec<u8>> {
    if !COMPRESSION_LEVELS.contains(&level) {
        return Err(DatabaseError::Config(format!(
            "compression level {level} is outside {}..={}",
            COMPRESSION_LEVELS.start(),
            COMPRESSION_LEVELS.end()
        )));
    }

    zstd::bulk::compress(data, level)
        .map_err(|e| DatabaseError::integrity("payload", format!("compression failed: {e}")))
}

/// Decompress bytes produced by [`compress`].
///
/// # Errors
///
/// Returns [`DatabaseError::Integrity`] if the bytes are not a valid zstd stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    zstd::decode_all(Cursor::new(data))
        .map_err(|e| DatabaseError::integrity("payload", format!("decompression failed: {e}")))
}

impl Compress for Pipeline {
    fn compress(&mut self, level: i32) -> Result<()> {
        if self.compressed {
            return Ok(());
        }

        self.data = compress(&self.data, level)?;
        self.compressed = true;
        self.compression_level = level;

        Ok(())
    }

    fn decompress(&mut self) -> Result<()> {
        if !self.compressed {
            return Ok(());
        }

        self.data = decompress(&self.data).map_err(|err| match err {
            DatabaseError::Integrity { reason, .. } => DatabaseError::integrity(
                "pipeline",
                format!("{} for commit {}", reason, self.commit),
            ),
            other => other,
        })?;
        self.compressed = false;

        Ok(())
    }
}
