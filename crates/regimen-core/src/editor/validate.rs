//! Range and shape checks for individual entries.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{
    error::{RegimenError, Result},
    models::PlanExerciseEntry,
};

pub const SETS_RANGE: RangeInclusive<u32> = 1..=100;
pub const REPS_RANGE: RangeInclusive<u32> = 1..=1000;

/// Outcome of validating one or more entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert a failed report into `RegimenError::Validation`.
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(RegimenError::Validation {
                errors: self.errors,
            })
        }
    }
}

/// Check a single entry, reporting every violation rather than the first.
pub fn validate(entry: &PlanExerciseEntry) -> ValidationReport {
    ValidationReport::from_errors(collect_errors(entry))
}

/// Validate a whole collection; messages are prefixed with the 1-based
/// position of the offending entry.
pub fn validate_all(entries: &[PlanExerciseEntry]) -> ValidationReport {
    let errors = entries
        .iter()
        .enumerate()
        .flat_map(|(index, entry)| {
            collect_errors(entry)
                .into_iter()
                .map(move |error| format!("Entry {}: {error}", index + 1))
        })
        .collect();
    ValidationReport::from_errors(errors)
}

fn collect_errors(entry: &PlanExerciseEntry) -> Vec<String> {
    let mut errors = Vec::new();

    if entry.exercise_id.trim().is_empty() {
        errors.push("Exercise is required".to_string());
    }
    if !SETS_RANGE.contains(&entry.sets) {
        errors.push(format!(
            "Sets must be between {} and {} (got {})",
            SETS_RANGE.start(),
            SETS_RANGE.end(),
            entry.sets
        ));
    }
    if !REPS_RANGE.contains(&entry.reps) {
        errors.push(format!(
            "Reps must be between {} and {} (got {})",
            REPS_RANGE.start(),
            REPS_RANGE.end(),
            entry.reps
        ));
    }
    if entry.sort_order < 1 {
        errors.push(format!("Sort order must be at least 1 (got {})", entry.sort_order));
    }
    if let Some(weight) = entry.default_weight {
        if weight < 0.0 || weight.is_nan() {
            errors.push(format!("Default weight cannot be negative (got {weight})"));
        }
    }

    errors
}
