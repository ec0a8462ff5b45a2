//! Tagged results returned by the remote store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegimenError, Result};

/// A single field-level complaint from the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Category of a failed remote call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFailureKind {
    ValidationFailed,
    NotFound,
    Unauthorized,
    ServerError,
}

impl fmt::Display for RemoteFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RemoteFailureKind::ValidationFailed => "validation",
            RemoteFailureKind::NotFound => "not-found",
            RemoteFailureKind::Unauthorized => "unauthorized",
            RemoteFailureKind::ServerError => "server",
        };
        f.write_str(label)
    }
}

/// Closed set of answers a remote call can produce.
///
/// Call sites match on this instead of poking at loosely shaped response
/// bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome<T> {
    Ok(T),
    ValidationFailed(Vec<FieldError>),
    NotFound,
    Unauthorized,
    ServerError(String),
}

impl<T> RemoteOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, RemoteOutcome::Ok(_))
    }

    /// `None` for `Ok`, otherwise the failure category.
    pub fn failure_kind(&self) -> Option<RemoteFailureKind> {
        match self {
            RemoteOutcome::Ok(_) => None,
            RemoteOutcome::ValidationFailed(_) => Some(RemoteFailureKind::ValidationFailed),
            RemoteOutcome::NotFound => Some(RemoteFailureKind::NotFound),
            RemoteOutcome::Unauthorized => Some(RemoteFailureKind::Unauthorized),
            RemoteOutcome::ServerError(_) => Some(RemoteFailureKind::ServerError),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RemoteOutcome<U> {
        match self {
            RemoteOutcome::Ok(value) => RemoteOutcome::Ok(f(value)),
            RemoteOutcome::ValidationFailed(errors) => RemoteOutcome::ValidationFailed(errors),
            RemoteOutcome::NotFound => RemoteOutcome::NotFound,
            RemoteOutcome::Unauthorized => RemoteOutcome::Unauthorized,
            RemoteOutcome::ServerError(message) => RemoteOutcome::ServerError(message),
        }
    }

    /// Collapse into the crate's error type.
    pub fn into_result(self) -> Result<T> {
        let (kind, message) = match self {
            RemoteOutcome::Ok(value) => return Ok(value),
            RemoteOutcome::ValidationFailed(errors) => (
                RemoteFailureKind::ValidationFailed,
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            RemoteOutcome::NotFound => (RemoteFailureKind::NotFound, "resource not found".into()),
            RemoteOutcome::Unauthorized => (RemoteFailureKind::Unauthorized, "not authorized".into()),
            RemoteOutcome::ServerError(message) => (RemoteFailureKind::ServerError, message),
        };
        Err(RegimenError::Remote { kind, message })
    }
}

impl<T> From<Result<T>> for RemoteOutcome<T> {
    /// Classify a store error into the closed remote outcome set.
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => RemoteOutcome::Ok(value),
            Err(RegimenError::PlanNotFound { .. } | RegimenError::ExerciseNotFound { .. }) => {
                RemoteOutcome::NotFound
            }
            Err(RegimenError::InvalidInput { field, reason }) => {
                RemoteOutcome::ValidationFailed(vec![FieldError::new(field, reason)])
            }
            Err(RegimenError::Validation { errors }) => RemoteOutcome::ValidationFailed(
                errors
                    .into_iter()
                    .map(|message| FieldError::new("entries", message))
                    .collect(),
            ),
            Err(other) => RemoteOutcome::ServerError(other.to_string()),
        }
    }
}
