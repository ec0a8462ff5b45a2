//! High-level async API over the SQLite store.
//!
//! [`Planner`] is the entry point used by the CLI. Each call opens the
//! database on a blocking worker thread via [`tokio::task::spawn_blocking`],
//! so the async runtime is never stalled by SQLite I/O.
//!
//! - [`builder`]: creates [`Planner`] instances with a configured database path
//! - [`plan_ops`]: catalog and plan operations
//! - [`entry_ops`]: edit-session based entry operations
//! - [`completion_ops`]: completion queries and the [`CompletionBackend`]
//!   implementation
//!
//! [`CompletionBackend`]: crate::completion::CompletionBackend
//!
//! # Usage
//!
//! ```rust,no_run
//! use regimen_core::{params::{AddEntries, CreateExercise, CreatePlan}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/regimen.db"))
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
//! assert_eq!(result.plan.entries.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    editor::AddDefaults,
    error::{RegimenError, Result},
};

pub mod builder;
pub mod completion_ops;
pub mod entry_ops;
pub mod plan_ops;


pub use builder::PlannerBuilder;
pub use entry_ops::EditResult;

/// Main interface for managing plans, entries and completions.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) add_defaults: AddDefaults,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, add_defaults: AddDefaults) -> Self {
        Self {
            db_path,
            add_defaults,
        }
    }

    /// Volume parameters used by [`Planner::add_entries`] when the request
    /// leaves them out.
    pub fn add_defaults(&self) -> &AddDefaults {
        &self.add_defaults
    }

    /// Run `f` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(RegimenError::join_error)?
    }
}
