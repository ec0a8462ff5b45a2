//! Plan entry queries and update-command application.

use jiff::Timestamp;
use log::debug;
use rusqlite::params;

use super::int_at;
use crate::{
    editor::validate_all,
    error::{DatabaseResultExt, RegimenError, Result},
    models::{ExerciseRef, PlanExerciseEntry},
    reconcile::UpdatePlanCommand,
};

const SELECT_ENTRIES_SQL: &str = "SELECT pe.exercise_id, pe.sort_order, pe.sets, pe.reps, pe.tempo, pe.default_weight, e.name, e.default_weight FROM plan_exercises pe LEFT JOIN exercises e ON e.id = pe.exercise_id WHERE pe.plan_id = ?1 ORDER BY pe.sort_order";
const CHECK_EXERCISE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1)";
const DELETE_ENTRY_SQL: &str = "DELETE FROM plan_exercises WHERE plan_id = ?1 AND exercise_id = ?2";
const DELETE_ENTRY_COMPLETION_SQL: &str =
    "DELETE FROM completions WHERE plan_id = ?1 AND exercise_id = ?2";
const INSERT_ENTRY_SQL: &str = "INSERT INTO plan_exercises (plan_id, exercise_id, sort_order, sets, reps, tempo, default_weight) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_ENTRY_SQL: &str = "UPDATE plan_exercises SET sort_order = ?1, sets = ?2, reps = ?3, tempo = ?4, default_weight = ?5 WHERE plan_id = ?6 AND exercise_id = ?7";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    fn build_entry_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanExerciseEntry> {
        let exercise_id: String = row.get(0)?;
        let name: Option<String> = row.get(6)?;
        let catalog_weight: Option<f64> = row.get(7)?;
        let exercise = name.map(|name| ExerciseRef {
            id: exercise_id.clone(),
            name,
            default_weight: catalog_weight,
        });

        Ok(PlanExerciseEntry {
            exercise_id,
            sort_order: int_at(row, 1)?,
            sets: int_at(row, 2)?,
            reps: int_at(row, 3)?,
            tempo: row.get(4)?,
            default_weight: row.get(5)?,
            exercise,
        })
    }

    /// Retrieves a plan's entries ordered by `sort_order`.
    pub fn get_entries(&self, plan_id: u64) -> Result<Vec<PlanExerciseEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ENTRIES_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![plan_id as i64], Self::build_entry_from_row)
            .db_context("Failed to query plan entries")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan entry row")?;

        Ok(entries)
    }

    /// Applies an update command in one transaction.
    ///
    /// Removed ids are deleted along with their completion records, added
    /// entries are inserted, and every entry in `command.entries` is written
    /// with its current field values whether or not it changed.
    pub fn apply_update_command(&mut self, command: &UpdatePlanCommand) -> Result<()> {
        validate_all(&command.entries).into_result()?;

        let plan_id = command.plan_id as i64;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)",
                params![plan_id],
                |row| row.get(0),
            )
            .db_context("Failed to check plan existence")?;
        if !plan_exists {
            return Err(RegimenError::PlanNotFound {
                id: command.plan_id,
            });
        }

        for exercise_id in &command.remove_exercise_ids {
            tx.execute(DELETE_ENTRY_SQL, params![plan_id, exercise_id])
                .db_context("Failed to remove plan entry")?;
            tx.execute(DELETE_ENTRY_COMPLETION_SQL, params![plan_id, exercise_id])
                .db_context("Failed to remove completion record")?;
        }

        for entry in &command.add_entries {
            let known: bool = tx
                .query_row(CHECK_EXERCISE_EXISTS_SQL, params![entry.exercise_id], |row| {
                    row.get(0)
                })
                .db_context("Failed to check exercise existence")?;
            if !known {
                return Err(RegimenError::ExerciseNotFound {
                    id: entry.exercise_id.clone(),
                });
            }

            tx.execute(
                INSERT_ENTRY_SQL,
                params![
                    plan_id,
                    entry.exercise_id,
                    entry.sort_order as i64,
                    entry.sets as i64,
                    entry.reps as i64,
                    entry.tempo,
                    entry.default_weight
                ],
            )
            .db_context("Failed to insert plan entry")?;
        }

        for entry in &command.entries {
            tx.execute(
                UPDATE_ENTRY_SQL,
                params![
                    entry.sort_order as i64,
                    entry.sets as i64,
                    entry.reps as i64,
                    entry.tempo,
                    entry.default_weight,
                    plan_id,
                    entry.exercise_id
                ],
            )
            .db_context("Failed to update plan entry")?;
        }

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), plan_id],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "plan {}: removed {}, added {}, wrote {} entries",
            command.plan_id,
            command.remove_exercise_ids.len(),
            command.add_entries.len(),
            command.entries.len()
        );
        Ok(())
    }
}
