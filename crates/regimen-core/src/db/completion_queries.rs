//! Completion record queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{int_at, optional_timestamp_at};
use crate::{
    error::{DatabaseResultExt, RegimenError, Result},
    models::{CompletionKey, CompletionReason, CompletionRecord, CompletionRequest},
};

const CHECK_ENTRY_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM plan_exercises WHERE plan_id = ?1 AND exercise_id = ?2)";
const CHECK_REASON_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM completion_reasons WHERE id = ?1)";
const UPSERT_COMPLETION_SQL: &str = "INSERT OR REPLACE INTO completions (plan_id, exercise_id, is_completed, reason_id, custom_reason, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_COMPLETION_COLUMNS: &str =
    "SELECT plan_id, exercise_id, is_completed, reason_id, custom_reason, completed_at FROM completions";
const SELECT_REASONS_SQL: &str = "SELECT id, label FROM completion_reasons ORDER BY id";

impl super::Database {
    fn build_completion_from_row(row: &rusqlite::Row) -> rusqlite::Result<CompletionRecord> {
        Ok(CompletionRecord {
            plan_id: int_at(row, 0)?,
            exercise_id: row.get(1)?,
            is_completed: row.get(2)?,
            reason_id: row.get(3)?,
            custom_reason: row.get(4)?,
            completed_at: optional_timestamp_at(row, 5)?,
        })
    }

    /// Stores a full replacement completion record for `key` and returns
    /// the record as read back from the store.
    ///
    /// # Errors
    ///
    /// - `RegimenError::PlanNotFound` when the plan does not exist
    /// - `RegimenError::ExerciseNotFound` when the exercise is not in the plan
    /// - `RegimenError::InvalidInput` for an unknown `reason_id`
    pub fn upsert_completion(
        &mut self,
        key: &CompletionKey,
        request: &CompletionRequest,
    ) -> Result<CompletionRecord> {
        if !self.plan_exists(key.plan_id)? {
            return Err(RegimenError::PlanNotFound { id: key.plan_id });
        }

        let in_plan: bool = self
            .connection
            .query_row(
                CHECK_ENTRY_EXISTS_SQL,
                params![key.plan_id as i64, key.exercise_id],
                |row| row.get(0),
            )
            .db_context("Failed to check plan entry")?;
        if !in_plan {
            return Err(RegimenError::ExerciseNotFound {
                id: key.exercise_id.clone(),
            });
        }

        if let Some(reason_id) = &request.reason_id {
            let known: bool = self
                .connection
                .query_row(CHECK_REASON_EXISTS_SQL, params![reason_id], |row| row.get(0))
                .db_context("Failed to check completion reason")?;
            if !known {
                return Err(RegimenError::invalid_input("reason_id")
                    .with_reason(format!("Unknown completion reason '{reason_id}'")));
            }
        }

        let record = request.to_record(key, Timestamp::now());
        self.connection
            .execute(
                UPSERT_COMPLETION_SQL,
                params![
                    key.plan_id as i64,
                    record.exercise_id,
                    record.is_completed,
                    record.reason_id,
                    record.custom_reason,
                    record.completed_at.map(|t| t.to_string())
                ],
            )
            .db_context("Failed to save completion record")?;

        self.get_completion(key)?.ok_or_else(|| {
            RegimenError::database("Completion record missing after write")
                .with_source(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Retrieves the record for one `(plan, exercise)` pair.
    pub fn get_completion(&self, key: &CompletionKey) -> Result<Option<CompletionRecord>> {
        let query = format!("{SELECT_COMPLETION_COLUMNS} WHERE plan_id = ?1 AND exercise_id = ?2");
        self.connection
            .query_row(
                &query,
                params![key.plan_id as i64, key.exercise_id],
                Self::build_completion_from_row,
            )
            .optional()
            .db_context("Failed to query completion record")
    }

    /// Retrieves every completion record of a plan ordered by exercise id.
    pub fn get_completions(&self, plan_id: u64) -> Result<Vec<CompletionRecord>> {
        let query = format!("{SELECT_COMPLETION_COLUMNS} WHERE plan_id = ?1 ORDER BY exercise_id");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map(params![plan_id as i64], Self::build_completion_from_row)
            .db_context("Failed to query completion records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read completion row")?;

        Ok(records)
    }

    /// Lists the predefined non-completion reasons.
    pub fn list_reasons(&self) -> Result<Vec<CompletionReason>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_REASONS_SQL)
            .db_context("Failed to prepare query")?;

        let reasons = stmt
            .query_map([], |row| {
                Ok(CompletionReason {
                    id: row.get(0)?,
                    label: row.get(1)?,
                })
            })
            .db_context("Failed to query completion reasons")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read completion reason row")?;

        Ok(reasons)
    }
}
