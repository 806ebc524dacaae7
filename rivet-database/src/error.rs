//! Database Error Handling
//!
//! Unified error type returned by every engine operation.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Errors that can occur when using the storage engine
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A mandatory field is missing or malformed; no statement was issued
    #[error("invalid {entity} {field}: {reason}")]
    Validation {
        entity: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    /// Zero rows matched the requested key
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// Uniqueness, foreign key, not-null or check violation raised by the backend
    #[error("constraint violation: {0}")]
    Constraint(#[source] sqlx::Error),

    /// Any other failure from the underlying connection
    #[error("database error: {0}")]
    Backend(#[source] sqlx::Error),

    /// A DDL statement failed while bringing the schema up
    #[error("unable to create {object}: {source}")]
    Schema {
        object: String,
        #[source]
        source: sqlx::Error,
    },

    /// The declared schema cannot be ordered (unknown reference or cycle)
    #[error("invalid schema: {0}")]
    SchemaPlan(String),

    /// Stored bytes could not be compressed, decompressed or decoded
    #[error("corrupt {entity} data: {reason}")]
    Integrity { entity: &'static str, reason: String },

    /// Filter key outside the allow-list
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// Filter value that cannot be parsed for its key
    #[error("invalid value '{value}' for filter '{key}'")]
    InvalidFilter { key: String, value: String },

    /// Engine configuration rejected at construction
    #[error("invalid engine configuration: {0}")]
    Config(String),
}

impl DatabaseError {
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn integrity(entity: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Integrity {
            entity,
            reason: reason.to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was raised by a backend constraint
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }

    /// Check if this error was raised before any statement was issued
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        let constraint = match &err {
            sqlx::Error::Database(db) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        };

        if constraint {
            DatabaseError::Constraint(err)
        } else {
            DatabaseError::Backend(err)
        }
    }
}
