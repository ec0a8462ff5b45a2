//! Membership diff between a persisted collection and an edit buffer.
//!
//! Entries are keyed by `exercise_id`. An id present on both sides is "kept"
//! and reported by neither [`to_remove`] nor [`to_add`], even when its sets,
//! reps or order changed; [`UpdatePlanCommand`] carries the full current
//! value of every kept entry instead of a field-level diff.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    editor::{normalize, validate_all},
    error::Result,
    models::PlanExerciseEntry,
};

fn key_set(entries: &[PlanExerciseEntry]) -> HashSet<&str> {
    entries.iter().map(|e| e.exercise_id.as_str()).collect()
}

/// Ids present in `original` but absent from `updated`, in `original` order.
pub fn to_remove(original: &[PlanExerciseEntry], updated: &[PlanExerciseEntry]) -> Vec<String> {
    let keep = key_set(updated);
    original
        .iter()
        .filter(|e| !keep.contains(e.exercise_id.as_str()))
        .map(|e| e.exercise_id.clone())
        .collect()
}

/// Entries of `updated` whose id is absent from `original`, in `updated`
/// order.
pub fn to_add(
    original: &[PlanExerciseEntry],
    updated: &[PlanExerciseEntry],
) -> Vec<PlanExerciseEntry> {
    let known = key_set(original);
    updated
        .iter()
        .filter(|e| !known.contains(e.exercise_id.as_str()))
        .cloned()
        .collect()
}

/// Both halves of the membership diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDiff {
    pub removed: Vec<String>,
    pub added: Vec<PlanExerciseEntry>,
}

impl PlanDiff {
    pub fn between(original: &[PlanExerciseEntry], updated: &[PlanExerciseEntry]) -> Self {
        Self {
            removed: to_remove(original, updated),
            added: to_add(original, updated),
        }
    }

    /// True when membership is unchanged.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    /// Human readable change lines for result output.
    pub fn describe(&self) -> Vec<String> {
        let removed = self.removed.iter().map(|id| format!("Removed {id}"));
        let added = self
            .added
            .iter()
            .map(|e| format!("Added {} at position {}", e.display_name(), e.sort_order));
        removed.chain(added).collect()
    }
}

/// Update command handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlanCommand {
    pub plan_id: u64,
    /// Exercise ids to delete from the plan
    pub remove_exercise_ids: Vec<String>,
    /// Entries to insert
    pub add_entries: Vec<PlanExerciseEntry>,
    /// Full normalized list; kept entries are written from here
    pub entries: Vec<PlanExerciseEntry>,
}

impl UpdatePlanCommand {
    /// Diff `updated` against `original` and package the result.
    ///
    /// `updated` is normalized first. Every entry must pass validation; all
    /// problems across all entries are returned together.
    pub fn build(
        plan_id: u64,
        original: &[PlanExerciseEntry],
        updated: &[PlanExerciseEntry],
    ) -> Result<Self> {
        let entries = normalize(updated);
        validate_all(&entries).into_result()?;

        let diff = PlanDiff::between(original, &entries);
        Ok(Self {
            plan_id,
            remove_exercise_ids: diff.removed,
            add_entries: diff.added,
            entries,
        })
    }

    pub fn diff(&self) -> PlanDiff {
        PlanDiff {
            removed: self.remove_exercise_ids.clone(),
            added: self.add_entries.clone(),
        }
    }

    /// Serialize the command as the JSON body sent to the backend.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
