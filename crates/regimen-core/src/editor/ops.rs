//! Add, remove, update and reorder operations on a plan's entries.

use super::ordering::{normalize, normalize_owned};
use crate::{
    error::{RegimenError, Result},
    models::{EntryPatch, ExerciseRef, PlanExerciseEntry},
};

/// Default sets for newly added entries.
pub const DEFAULT_SETS: u32 = 3;
/// Default reps for newly added entries.
pub const DEFAULT_REPS: u32 = 10;
/// Default tempo for newly added entries.
pub const DEFAULT_TEMPO: &str = "3-0-1-0";

/// Volume parameters given to entries created by [`add_many`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDefaults {
    pub sets: u32,
    pub reps: u32,
    pub tempo: String,
}

impl Default for AddDefaults {
    fn default() -> Self {
        Self {
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            tempo: DEFAULT_TEMPO.to_string(),
        }
    }
}

fn check_index(operation: &'static str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(RegimenError::out_of_bounds(operation, index, len));
    }
    Ok(())
}

/// Drop the entry at `index` and renumber the rest.
///
/// # Errors
///
/// `RegimenError::IndexOutOfBounds` when `index >= entries.len()`.
pub fn remove_at(entries: &[PlanExerciseEntry], index: usize) -> Result<Vec<PlanExerciseEntry>> {
    check_index("remove_at", index, entries.len())?;

    let remaining = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, entry)| entry.clone())
        .collect();
    Ok(normalize_owned(remaining))
}

/// Append one entry per catalog reference, in input order.
///
/// New entries take their weight from the reference's default weight and
/// carry the reference as their display snapshot.
pub fn add_many(
    entries: &[PlanExerciseEntry],
    refs: &[ExerciseRef],
    defaults: &AddDefaults,
) -> Vec<PlanExerciseEntry> {
    let mut combined = Vec::with_capacity(entries.len() + refs.len());
    combined.extend_from_slice(entries);
    combined.extend(refs.iter().map(|exercise| PlanExerciseEntry {
        default_weight: exercise.default_weight,
        exercise: Some(exercise.clone()),
        ..PlanExerciseEntry::new(
            exercise.id.clone(),
            defaults.sets,
            defaults.reps,
            defaults.tempo.clone(),
        )
    }));
    normalize_owned(combined)
}

/// Replace the fields named by `patch` on the entry at `index`.
///
/// # Errors
///
/// `RegimenError::IndexOutOfBounds` when `index >= entries.len()`.
pub fn update_at(
    entries: &[PlanExerciseEntry],
    index: usize,
    patch: &EntryPatch,
) -> Result<Vec<PlanExerciseEntry>> {
    check_index("update_at", index, entries.len())?;

    let updated = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i == index {
                patch.apply_to(entry)
            } else {
                entry.clone()
            }
        })
        .collect();
    Ok(normalize_owned(updated))
}

/// Renumber a sequence whose array order was changed externally, e.g. by a
/// drag-and-drop.
pub fn reorder(entries: &[PlanExerciseEntry]) -> Vec<PlanExerciseEntry> {
    normalize(entries)
}

/// Move the entry at `from` so that it ends up at index `to`.
///
/// # Errors
///
/// `RegimenError::IndexOutOfBounds` when either index is outside the
/// collection.
pub fn move_entry(
    entries: &[PlanExerciseEntry],
    from: usize,
    to: usize,
) -> Result<Vec<PlanExerciseEntry>> {
    check_index("move_entry", from, entries.len())?;
    check_index("move_entry", to, entries.len())?;

    let mut moved = entries.to_vec();
    let entry = moved.remove(from);
    moved.insert(to, entry);
    Ok(normalize_owned(moved))
}

/// Exchange the positions of two entries.
///
/// # Errors
///
/// `RegimenError::IndexOutOfBounds` when either index is outside the
/// collection.
pub fn swap_entries(
    entries: &[PlanExerciseEntry],
    a: usize,
    b: usize,
) -> Result<Vec<PlanExerciseEntry>> {
    check_index("swap_entries", a, entries.len())?;
    check_index("swap_entries", b, entries.len())?;

    let mut swapped = entries.to_vec();
    swapped.swap(a, b);
    Ok(normalize_owned(swapped))
}
