//! Completion records and their composite cache key.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Composite key identifying one exercise occurrence within one plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompletionKey {
    pub plan_id: u64,
    pub exercise_id: String,
}

impl CompletionKey {
    pub fn new(plan_id: u64, exercise_id: impl Into<String>) -> Self {
        Self {
            plan_id,
            exercise_id: exercise_id.into(),
        }
    }
}

/// Whether an exercise occurrence was performed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// No record exists yet
    Unknown,
    /// The exercise was performed
    Completed,
    /// The exercise was skipped
    NotCompleted,
}

impl CompletionStatus {
    /// Derive the status for a key from its cached record, if any.
    pub fn of(record: Option<&CompletionRecord>) -> Self {
        match record {
            None => CompletionStatus::Unknown,
            Some(r) if r.is_completed => CompletionStatus::Completed,
            Some(_) => CompletionStatus::NotCompleted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Unknown => "unknown",
            CompletionStatus::Completed => "completed",
            CompletionStatus::NotCompleted => "notcompleted",
        }
    }

    /// Status with a leading icon for list output.
    pub fn with_icon(&self) -> &'static str {
        match self {
            CompletionStatus::Completed => "✓ Completed",
            CompletionStatus::NotCompleted => "✗ Skipped",
            CompletionStatus::Unknown => "○ Pending",
        }
    }
}

impl FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "pending" => Ok(CompletionStatus::Unknown),
            "completed" | "done" => Ok(CompletionStatus::Completed),
            "notcompleted" | "not_completed" | "skipped" => Ok(CompletionStatus::NotCompleted),
            _ => Err(format!("Invalid completion status: {s}")),
        }
    }
}

/// One persisted completion fact for a `(plan, exercise)` pair.
///
/// A write for an existing key replaces the record wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRecord {
    pub plan_id: u64,
    pub exercise_id: String,
    pub is_completed: bool,
    /// Predefined non-completion reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_id: Option<String>,
    /// Free-text explanation, may accompany `reason_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_reason: Option<String>,
    /// Time of the last status change
    pub completed_at: Option<Timestamp>,
}

impl CompletionRecord {
    pub fn key(&self) -> CompletionKey {
        CompletionKey::new(self.plan_id, self.exercise_id.clone())
    }

    pub fn status(&self) -> CompletionStatus {
        CompletionStatus::of(Some(self))
    }
}

/// Payload of a completion mutation, keyed by [`CompletionKey`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_reason: Option<String>,
}

impl CompletionRequest {
    /// Mark the exercise as performed.
    pub fn completed() -> Self {
        Self {
            completed: true,
            ..Default::default()
        }
    }

    /// Mark the exercise as skipped with an optional reason.
    pub fn skipped(reason_id: Option<String>, custom_reason: Option<String>) -> Self {
        Self {
            completed: false,
            reason_id,
            custom_reason,
        }
    }

    /// Full replacement record this request produces at `at`.
    pub fn to_record(&self, key: &CompletionKey, at: Timestamp) -> CompletionRecord {
        CompletionRecord {
            plan_id: key.plan_id,
            exercise_id: key.exercise_id.clone(),
            is_completed: self.completed,
            reason_id: self.reason_id.clone(),
            custom_reason: self.custom_reason.clone(),
            completed_at: Some(at),
        }
    }
}

/// Predefined reason for not completing an exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionReason {
    pub id: String,
    pub label: String,
}
