//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Planner;
use crate::{
    editor::{validate, AddDefaults},
    error::{RegimenError, Result},
    models::PlanExerciseEntry,
};

/// Configures where plans are stored and how new entries are filled in.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    add_defaults: AddDefaults,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, the plan store lives at
    /// `$XDG_DATA_HOME/regimen/regimen.db` (usually
    /// `~/.local/share/regimen/regimen.db`).
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets, reps and tempo given to appended exercises when the caller does
    /// not name them. Defaults to 3x10 at `3-0-1-0`.
    pub fn with_add_defaults(mut self, defaults: AddDefaults) -> Self {
        self.add_defaults = defaults;
        self
    }

    /// Opens (and if needed creates) the plan store.
    ///
    /// # Errors
    ///
    /// - `RegimenError::Configuration` if the add defaults would produce
    ///   invalid entries
    /// - `RegimenError::FileSystem` if the data directory cannot be created
    /// - `RegimenError::Database` if the schema cannot be initialized
    pub async fn build(self) -> Result<Planner> {
        check_add_defaults(&self.add_defaults)?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RegimenError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let planner = Planner::new(db_path, self.add_defaults);
        // Opening the store once applies the schema and migrations
        planner.with_db(|_| Ok(())).await?;

        debug!("plan store ready at {}", planner.db_path.display());
        Ok(planner)
    }
}

/// Reject defaults that every appended entry would then fail validation on.
fn check_add_defaults(defaults: &AddDefaults) -> Result<()> {
    let sample = PlanExerciseEntry {
        sort_order: 1,
        ..PlanExerciseEntry::new("default", defaults.sets, defaults.reps, defaults.tempo.as_str())
    };
    validate(&sample)
        .into_result()
        .map_err(|e| RegimenError::Configuration {
            message: format!("Invalid add defaults: {e}"),
        })
}

fn default_database_path() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix("regimen")
        .place_data_file("regimen.db")
        .map_err(|e| RegimenError::XdgDirectory(e.to_string()))
}
