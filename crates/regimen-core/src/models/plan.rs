//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanExerciseEntry;

/// A named, ordered collection of exercise entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Exercise entries ordered by `sort_order`
    #[serde(default)]
    pub entries: Vec<PlanExerciseEntry>,
}
