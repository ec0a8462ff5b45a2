//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{CompletionReason, CompletionRecord, CompletionStatus, ExerciseRef, Plan, PlanSummary};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// # Examples
///
/// ```rust
/// use regimen_core::{display::PlanSummaries, models::PlanSummary};
/// use jiff::Timestamp;
///
/// let plan = PlanSummary {
///     id: 1,
///     title: "Push day".to_string(),
///     description: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     total_exercises: 4,
///     completed: 1,
///     skipped: 1,
///     pending: 2,
/// };
///
/// let output = format!("{}", PlanSummaries(vec![plan]));
/// assert!(output.contains("Push day"));
/// assert!(output.contains("1/4 done"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the exercise catalog.
pub struct Exercises(pub Vec<ExerciseRef>);

impl Exercises {
    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of exercises in the catalog.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Exercises {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No exercises found.")
        } else {
            for exercise in &self.0 {
                write!(f, "{exercise}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for the completion reason catalog.
pub struct Reasons(pub Vec<CompletionReason>);

impl fmt::Display for Reasons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No completion reasons defined.");
        }
        for reason in &self.0 {
            writeln!(f, "- `{}`: {}", reason.id, reason.label)?;
        }
        Ok(())
    }
}

/// Per-entry completion view of one plan.
///
/// Every entry of the plan is listed in order with its status. Entries with no
/// record show as pending; records for exercises no longer in the plan are not
/// shown.
pub struct CompletionBoard<'a> {
    pub plan: &'a Plan,
    pub records: &'a [CompletionRecord],
}

impl<'a> CompletionBoard<'a> {
    /// Create a board for `plan` from its completion records.
    pub fn new(plan: &'a Plan, records: &'a [CompletionRecord]) -> Self {
        Self { plan, records }
    }

    fn record_for(&self, exercise_id: &str) -> Option<&'a CompletionRecord> {
        self.records.iter().find(|r| r.exercise_id == exercise_id)
    }
}

impl fmt::Display for CompletionBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.plan.id, self.plan.title)?;
        writeln!(f)?;

        if self.plan.entries.is_empty() {
            return writeln!(f, "No exercises in this plan.");
        }

        for entry in &self.plan.entries {
            let record = self.record_for(&entry.exercise_id);
            write!(
                f,
                "{}. **{}** {}",
                entry.sort_order,
                entry.display_name(),
                CompletionStatus::of(record).with_icon()
            )?;
            if let Some(record) = record {
                if let Some(reason) = &record.reason_id {
                    write!(f, " [{reason}]")?;
                }
                if let Some(note) = &record.custom_reason {
                    write!(f, " {note}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
