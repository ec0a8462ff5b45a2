//! Plan exercise entries and the catalog snapshots they reference.

use serde::{Deserialize, Serialize};

/// Snapshot of an exercise definition from the catalog.
///
/// Carried on entries for display only; never diffed and never treated as
/// authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRef {
    /// Opaque identifier of the exercise definition
    pub id: String,

    /// Human readable exercise name
    pub name: String,

    /// Suggested working weight, copied onto new plan entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_weight: Option<f64>,
}

impl ExerciseRef {
    /// Build a snapshot with no default weight.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_weight: None,
        }
    }

    /// Attach a default weight to the snapshot.
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = Some(weight);
        self
    }
}

/// One row of a plan's ordered exercise list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanExerciseEntry {
    /// Referenced exercise definition (foreign reference, not owned)
    pub exercise_id: String,

    /// 1-based position within the plan; always `index + 1` once normalized
    pub sort_order: u32,

    /// Number of sets, valid range [1, 100]
    pub sets: u32,

    /// Repetitions per set, valid range [1, 1000]
    pub reps: u32,

    /// Free-form tempo code such as `3-0-1-0`
    pub tempo: String,

    /// Working weight; `None` means unspecified
    #[serde(default)]
    pub default_weight: Option<f64>,

    /// Denormalized catalog snapshot for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseRef>,
}

impl PlanExerciseEntry {
    /// Create an entry for `exercise_id` with the given volume parameters.
    ///
    /// The `sort_order` is left at zero; entries only receive a real position
    /// when they pass through [`crate::editor::normalize`].
    pub fn new(exercise_id: impl Into<String>, sets: u32, reps: u32, tempo: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            sort_order: 0,
            sets,
            reps,
            tempo: tempo.into(),
            default_weight: None,
            exercise: None,
        }
    }

    /// Display name, falling back to the exercise id when no snapshot is
    /// attached.
    pub fn display_name(&self) -> &str {
        self.exercise
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or(self.exercise_id.as_str())
    }
}

/// Partial update for a single entry.
///
/// Only the mutable volume fields can be patched. `exercise_id` is the
/// reconciliation key and `sort_order` belongs to the normalizer, so neither
/// is reachable from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub tempo: Option<String>,
    /// `Some(None)` clears the weight, `None` leaves it untouched
    pub default_weight: Option<Option<f64>>,
}

impl EntryPatch {
    /// Returns true when the patch names no field at all.
    pub fn is_empty(&self) -> bool {
        self.sets.is_none()
            && self.reps.is_none()
            && self.tempo.is_none()
            && self.default_weight.is_none()
    }

    /// Produce a copy of `entry` with the named fields replaced.
    pub fn apply_to(&self, entry: &PlanExerciseEntry) -> PlanExerciseEntry {
        let mut updated = entry.clone();
        if let Some(sets) = self.sets {
            updated.sets = sets;
        }
        if let Some(reps) = self.reps {
            updated.reps = reps;
        }
        if let Some(tempo) = &self.tempo {
            updated.tempo = tempo.clone();
        }
        if let Some(weight) = self.default_weight {
            updated.default_weight = weight;
        }
        updated
    }

    /// Human readable list of the fields this patch changes.
    pub fn describe(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(sets) = self.sets {
            changes.push(format!("Sets set to {sets}"));
        }
        if let Some(reps) = self.reps {
            changes.push(format!("Reps set to {reps}"));
        }
        if let Some(tempo) = &self.tempo {
            changes.push(format!("Tempo set to {tempo}"));
        }
        match self.default_weight {
            Some(Some(weight)) => changes.push(format!("Weight set to {weight}")),
            Some(None) => changes.push("Weight cleared".to_string()),
            None => {}
        }
        changes
    }
}
