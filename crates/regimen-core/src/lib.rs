//! Core library for the Regimen training plan application.
//!
//! This crate composes training plans out of catalog exercises and keeps
//! per-exercise completion status in sync with a backend:
//!
//! - [`editor`]: pure list operations over plan entries (add, remove, update,
//!   move, reorder), duplicate guarding, normalization of `sort_order` and
//!   validation that reports every problem at once
//! - [`reconcile`]: membership diff between the persisted and edited entry
//!   lists and the update command sent to storage
//! - [`completion`]: optimistic completion writes with rollback, cached per
//!   plan and invalidated once the backend answers
//! - [`db`] and [`planner`]: SQLite persistence and the async facade over it
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown, and the
//! [`display`] module adds contextual wrappers for collections and operation
//! results. The CLI renders this markdown in the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use regimen_core::{
//!     params::{AddEntries, CreateExercise, CreatePlan},
//!     CompletionKey, CompletionRequest, CompletionSync, PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("regimen.db"))
//!     .build()
//!     .await?;
//!
//! planner
//!     .add_exercise(&CreateExercise {
//!         id: "squat".to_string(),
//!         name: "Back Squat".to_string(),
//!         default_weight: Some(80.0),
//!     })
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Leg day".to_string(),
//!         description: None,
//!     })
//!     .await?;
//!
//! let result = planner
//!     .add_entries(&AddEntries {
//!         plan_id: plan.id,
//!         exercise_ids: vec!["squat".to_string()],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{result}");
//!
//! let sync = CompletionSync::new(planner.clone());
//! sync.set_completion(CompletionKey::new(plan.id, "squat"), CompletionRequest::completed())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod db;
pub mod display;
pub mod editor;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod reconcile;

// Re-export commonly used types
pub use completion::{CacheScope, CompletionBackend, CompletionCache, CompletionSync, SyncEvent};
pub use db::Database;
pub use display::{
    CompletionBoard, CreateResult, DeleteResult, Exercises, OperationStatus, PlanSummaries,
    Reasons, UpdateResult,
};
pub use editor::{EditSession, ValidationReport};
pub use error::{RegimenError, Result};
pub use models::{
    CompletionKey, CompletionReason, CompletionRecord, CompletionRequest, CompletionStatus,
    EntryPatch, ExerciseRef, FieldError, Plan, PlanExerciseEntry, PlanSummary, RemoteFailureKind,
    RemoteOutcome,
};
pub use planner::{EditResult, Planner, PlannerBuilder};
pub use reconcile::{PlanDiff, UpdatePlanCommand};
