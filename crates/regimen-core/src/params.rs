//! Parameter structures for regimen operations.
//!
//! These are interface-agnostic: the CLI converts its clap argument structs
//! into them with `From` impls, keeping framework derives out of the core.
//! Positions in these structures are 1-based, the way users count entries;
//! [`position_to_index`] converts them for the editor.

use serde::{Deserialize, Serialize};

use crate::{
    editor::AddDefaults,
    error::{RegimenError, Result},
    models::{CompletionKey, CompletionRequest, EntryPatch},
};

/// Convert a 1-based user position into a 0-based index.
pub fn position_to_index(position: u32) -> Result<usize> {
    if position == 0 {
        return Err(RegimenError::invalid_input("position")
            .with_reason("Positions start at 1"));
    }
    Ok(position as usize - 1)
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    /// Optional detailed description of the plan
    pub description: Option<String>,
}

/// Parameters for deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlan {
    pub id: u64,
    /// Deletion is refused unless explicitly confirmed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding or updating a catalog exercise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExercise {
    pub id: String,
    pub name: String,
    pub default_weight: Option<f64>,
}

/// Parameters for appending catalog exercises to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddEntries {
    pub plan_id: u64,
    pub exercise_ids: Vec<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub tempo: Option<String>,
}

impl AddEntries {
    /// `base` with any overrides from these parameters applied.
    pub fn defaults(&self, base: &AddDefaults) -> AddDefaults {
        AddDefaults {
            sets: self.sets.unwrap_or(base.sets),
            reps: self.reps.unwrap_or(base.reps),
            tempo: self.tempo.clone().unwrap_or_else(|| base.tempo.clone()),
        }
    }
}

/// Parameters for removing the entry at a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveEntry {
    pub plan_id: u64,
    /// 1-based position
    pub position: u32,
}

/// Parameters for updating the entry at a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub plan_id: u64,
    /// 1-based position
    pub position: u32,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub tempo: Option<String>,
    pub weight: Option<f64>,
    /// Clear the weight; conflicts with `weight`
    #[serde(default)]
    pub clear_weight: bool,
}

impl UpdateEntry {
    /// Build the editor patch, rejecting contradictory or empty updates.
    pub fn to_patch(&self) -> Result<EntryPatch> {
        if self.clear_weight && self.weight.is_some() {
            return Err(RegimenError::invalid_input("weight")
                .with_reason("Cannot set and clear the weight at the same time"));
        }

        let default_weight = if self.clear_weight {
            Some(None)
        } else {
            self.weight.map(Some)
        };
        let patch = EntryPatch {
            sets: self.sets,
            reps: self.reps,
            tempo: self.tempo.clone(),
            default_weight,
        };

        if patch.is_empty() {
            return Err(RegimenError::invalid_input("update")
                .with_reason("Nothing to update. Provide at least one field"));
        }
        Ok(patch)
    }
}

/// Parameters for moving an entry to another position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveEntry {
    pub plan_id: u64,
    /// 1-based source position
    pub from: u32,
    /// 1-based target position
    pub to: u32,
}

/// Parameters for recording whether an exercise was performed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetCompletion {
    pub plan_id: u64,
    pub exercise_id: String,
    pub completed: bool,
    pub reason_id: Option<String>,
    pub custom_reason: Option<String>,
}

impl SetCompletion {
    pub fn key(&self) -> CompletionKey {
        CompletionKey::new(self.plan_id, self.exercise_id.clone())
    }

    pub fn request(&self) -> CompletionRequest {
        CompletionRequest {
            completed: self.completed,
            reason_id: self.reason_id.clone(),
            custom_reason: self.custom_reason.clone(),
        }
    }
}
