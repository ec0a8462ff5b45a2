//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create, update,
//! and delete operations with consistent messaging and resource display.

use std::fmt;

use crate::{
    models::{CompletionRecord, ExerciseRef, Plan},
    planner::EditResult,
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use regimen_core::{display::CreateResult, models::Plan};
/// use jiff::Timestamp;
///
/// let plan = Plan {
///     id: 1,
///     title: "Push day".to_string(),
///     description: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     entries: vec![],
/// };
///
/// let output = format!("{}", CreateResult::new(plan));
/// assert!(output.starts_with("Created plan with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ExerciseRef> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved exercise '{}'", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can track and display specific changes made during the update.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

fn write_changes(f: &mut fmt::Formatter<'_>, changes: &[String]) -> fmt::Result {
    if !changes.is_empty() {
        writeln!(f)?;
        writeln!(f, "Changes made:")?;
        for change in changes {
            writeln!(f, "- {change}")?;
        }
    }
    Ok(())
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;
        write_changes(f, &self.changes)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<CompletionRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Recorded completion for '{}' in plan {}",
            self.resource.exercise_id, self.resource.plan_id
        )?;
        write_changes(f, &self.changes)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for EditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut changes = self.diff.describe();
        changes.extend(self.changes.iter().cloned());
        changes.extend(
            self.skipped
                .iter()
                .map(|exercise| format!("Skipped '{}': already in plan", exercise.name)),
        );

        if changes.is_empty() {
            writeln!(f, "No changes to plan with ID: {}", self.plan.id)?;
        } else {
            writeln!(f, "Updated plan with ID: {}", self.plan.id)?;
            write_changes(f, &changes)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}
