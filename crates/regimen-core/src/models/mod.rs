//! Data models for plans, exercise entries and completion records.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so the structures here stay free of
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use regimen_core::models::{ExerciseRef, PlanExerciseEntry};
//!
//! let mut entry = PlanExerciseEntry::new("squat", 5, 5, "3-0-1-0");
//! entry.exercise = Some(ExerciseRef::new("squat", "Back Squat"));
//! assert_eq!(entry.display_name(), "Back Squat");
//! ```

pub mod completion;
pub mod entry;
pub mod outcome;
pub mod plan;
pub mod summary;


pub use completion::{
    CompletionKey, CompletionReason, CompletionRecord, CompletionRequest, CompletionStatus,
};
pub use entry::{EntryPatch, ExerciseRef, PlanExerciseEntry};
pub use outcome::{FieldError, RemoteFailureKind, RemoteOutcome};
pub use plan::Plan;
pub use summary::PlanSummary;
