//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{CompletionRecord, Plan};

/// Plan-level aggregate with completion counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the plan
    pub title: String,
    /// Detailed multi-line description of the plan
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Number of exercise entries in the plan
    pub total_exercises: u32,
    /// Entries recorded as performed
    pub completed: u32,
    /// Entries recorded as not performed
    pub skipped: u32,
    /// Entries with no completion record
    pub pending: u32,
}

impl PlanSummary {
    /// Create a PlanSummary from a plan and its completion records.
    ///
    /// Records for exercises that are no longer part of the plan are ignored.
    pub fn from_plan(plan: &Plan, records: &[CompletionRecord]) -> Self {
        let total_exercises = plan.entries.len() as u32;
        let mut completed = 0;
        let mut skipped = 0;
        for entry in &plan.entries {
            match records.iter().find(|r| r.exercise_id == entry.exercise_id) {
                Some(r) if r.is_completed => completed += 1,
                Some(_) => skipped += 1,
                None => {}
            }
        }

        Self {
            id: plan.id,
            title: plan.title.clone(),
            description: plan.description.clone(),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_exercises,
            completed,
            skipped,
            pending: total_exercises - completed - skipped,
        }
    }
}
