//! Duplicate detection by `exercise_id`.

use std::collections::HashSet;

use crate::models::{ExerciseRef, PlanExerciseEntry};

/// True iff some entry already references `exercise_id`.
pub fn is_duplicate(entries: &[PlanExerciseEntry], exercise_id: &str) -> bool {
    entries.iter().any(|e| e.exercise_id == exercise_id)
}

/// Candidates whose id is not already present in `entries`, in candidate
/// order.
pub fn filter_new(entries: &[PlanExerciseEntry], candidates: &[ExerciseRef]) -> Vec<ExerciseRef> {
    partition_new(entries, candidates).0
}

/// Split candidates into `(fresh, duplicates)`, both in candidate order.
///
/// A candidate repeated within `candidates` itself is kept once; later
/// repeats land in `duplicates`.
pub fn partition_new(
    entries: &[PlanExerciseEntry],
    candidates: &[ExerciseRef],
) -> (Vec<ExerciseRef>, Vec<ExerciseRef>) {
    let mut seen: HashSet<&str> = entries.iter().map(|e| e.exercise_id.as_str()).collect();
    let mut fresh = Vec::new();
    let mut duplicates = Vec::new();
    for candidate in candidates {
        if seen.insert(candidate.id.as_str()) {
            fresh.push(candidate.clone());
        } else {
            duplicates.push(candidate.clone());
        }
    }
    (fresh, duplicates)
}
