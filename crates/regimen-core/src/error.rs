//! Error types for the regimen library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::RemoteFailureKind;

/// Comprehensive error type for all regimen operations.
#[derive(Error, Debug)]
pub enum RegimenError {
    /// An editor operation addressed a position outside the collection.
    ///
    /// This is a caller bug, not a user error: clamping or ignoring the index
    /// would let `sort_order` drift away from array position.
    #[error("{operation}: index {index} is out of bounds for a collection of {len} entries")]
    IndexOutOfBounds {
        operation: &'static str,
        index: usize,
        len: usize,
    },
    /// One or more entries failed validation; every problem is listed
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },
    /// A remote mutation was rejected or could not be delivered
    #[error("Remote {kind} failure: {message}")]
    Remote {
        kind: RemoteFailureKind,
        message: String,
    },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Exercise definition not found in the catalog
    #[error("Exercise '{id}' not found")]
    ExerciseNotFound { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> RegimenError {
        RegimenError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RegimenError {
        RegimenError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RegimenError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub(crate) fn out_of_bounds(operation: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            operation,
            index,
            len,
        }
    }

    pub(crate) fn join_error(e: impl fmt::Display) -> Self {
        Self::Configuration {
            message: format!("Task join error: {e}"),
        }
    }

    /// Whether this error is a recoverable, user-facing problem as opposed to
    /// a programming error in the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::IndexOutOfBounds { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RegimenError::database(message).with_source(e))
    }
}

/// Result type alias for regimen operations
pub type Result<T> = std::result::Result<T, RegimenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_message() {
        let err = RegimenError::Validation {
            errors: vec!["sets out of range".into(), "reps out of range".into()],
        };
        let text = err.to_string();
        assert!(text.contains("sets out of range"));
        assert!(text.contains("reps out of range"));
    }

    #[test]
    fn test_index_out_of_bounds_is_not_recoverable() {
        let err = RegimenError::out_of_bounds("remove_at", 4, 2);
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "remove_at: index 4 is out of bounds for a collection of 2 entries"
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load plan").unwrap_err();
        assert!(matches!(err, RegimenError::Database { ref message, .. } if message == "Failed to load plan"));
        assert!(err.is_recoverable());
    }
}
