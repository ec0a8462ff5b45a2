//! Exercise catalog queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, RegimenError, Result},
    models::ExerciseRef,
};

const UPSERT_EXERCISE_SQL: &str = "INSERT INTO exercises (id, name, default_weight, created_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(id) DO UPDATE SET name = excluded.name, default_weight = excluded.default_weight";
const SELECT_EXERCISE_SQL: &str = "SELECT id, name, default_weight FROM exercises WHERE id = ?1";
const SELECT_ALL_EXERCISES_SQL: &str = "SELECT id, name, default_weight FROM exercises ORDER BY name";

impl super::Database {
    fn build_exercise_from_row(row: &rusqlite::Row) -> rusqlite::Result<ExerciseRef> {
        Ok(ExerciseRef {
            id: row.get(0)?,
            name: row.get(1)?,
            default_weight: row.get(2)?,
        })
    }

    /// Adds an exercise definition, or updates name and weight of an
    /// existing one.
    pub fn upsert_exercise(
        &mut self,
        id: &str,
        name: &str,
        default_weight: Option<f64>,
    ) -> Result<ExerciseRef> {
        if id.trim().is_empty() {
            return Err(RegimenError::invalid_input("id").with_reason("Exercise id cannot be empty"));
        }
        if let Some(weight) = default_weight {
            if weight < 0.0 {
                return Err(RegimenError::invalid_input("default_weight")
                    .with_reason(format!("Default weight cannot be negative (got {weight})")));
            }
        }

        self.connection
            .execute(
                UPSERT_EXERCISE_SQL,
                params![id, name, default_weight, Timestamp::now().to_string()],
            )
            .db_context("Failed to save exercise")?;

        Ok(ExerciseRef {
            id: id.into(),
            name: name.into(),
            default_weight,
        })
    }

    /// Retrieves a catalog entry by id.
    pub fn get_exercise(&self, id: &str) -> Result<Option<ExerciseRef>> {
        self.connection
            .query_row(SELECT_EXERCISE_SQL, params![id], Self::build_exercise_from_row)
            .optional()
            .db_context("Failed to query exercise")
    }

    /// Resolves several ids, preserving the requested order.
    ///
    /// # Errors
    ///
    /// `RegimenError::ExerciseNotFound` for the first id missing from the
    /// catalog.
    pub fn get_exercises(&self, ids: &[String]) -> Result<Vec<ExerciseRef>> {
        ids.iter()
            .map(|id| {
                self.get_exercise(id)?
                    .ok_or_else(|| RegimenError::ExerciseNotFound { id: id.clone() })
            })
            .collect()
    }

    /// Lists the whole catalog ordered by name.
    pub fn list_exercises(&self) -> Result<Vec<ExerciseRef>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_EXERCISES_SQL)
            .db_context("Failed to prepare query")?;

        let exercises = stmt
            .query_map([], Self::build_exercise_from_row)
            .db_context("Failed to query exercises")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read exercise row")?;

        Ok(exercises)
    }
}
