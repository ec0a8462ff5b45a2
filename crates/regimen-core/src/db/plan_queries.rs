//! Plan CRUD operations and summary queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{int_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, RegimenError, Result},
    models::{Plan, PlanSummary},
};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (title, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, title, description, created_at, updated_at FROM plans WHERE id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

// Entry counts only include completions whose exercise is still in the plan
const PLAN_SUMMARY_SQL: &str = "SELECT p.id, p.title, p.description, p.created_at, p.updated_at, \
     (SELECT COUNT(*) FROM plan_exercises pe WHERE pe.plan_id = p.id), \
     (SELECT COUNT(*) FROM plan_exercises pe JOIN completions c ON c.plan_id = pe.plan_id AND c.exercise_id = pe.exercise_id WHERE pe.plan_id = p.id AND c.is_completed = 1), \
     (SELECT COUNT(*) FROM plan_exercises pe JOIN completions c ON c.plan_id = pe.plan_id AND c.exercise_id = pe.exercise_id WHERE pe.plan_id = p.id AND c.is_completed = 0) \
     FROM plans p";

impl super::Database {
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: int_at(row, 0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
            updated_at: timestamp_at(row, 4)?,
            entries: Vec::new(),
        })
    }

    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanSummary> {
        let total_exercises: u32 = int_at(row, 5)?;
        let completed: u32 = int_at(row, 6)?;
        let skipped: u32 = int_at(row, 7)?;

        Ok(PlanSummary {
            id: int_at(row, 0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
            updated_at: timestamp_at(row, 4)?,
            total_exercises,
            completed,
            skipped,
            pending: total_exercises.saturating_sub(completed + skipped),
        })
    }

    /// Creates a new, empty plan.
    pub fn create_plan(&mut self, title: &str, description: Option<&str>) -> Result<Plan> {
        if title.trim().is_empty() {
            return Err(RegimenError::invalid_input("title").with_reason("Plan title cannot be empty"));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(INSERT_PLAN_SQL, params![title, description, &now_str, &now_str])
            .db_context("Failed to insert plan")?;

        Ok(Plan {
            id: self.connection.last_insert_rowid() as u64,
            title: title.into(),
            description: description.map(String::from),
            created_at: now,
            updated_at: now,
            entries: Vec::new(),
        })
    }

    /// Retrieves a plan by its ID with its entries in `sort_order`.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let mut plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        if let Some(ref mut plan) = plan {
            plan.entries = self.get_entries(plan.id)?;
        }

        Ok(plan)
    }

    pub(crate) fn plan_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)",
                params![id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check plan existence")
    }

    /// Lists every plan with its completion counts, newest first.
    pub fn list_plan_summaries(&self) -> Result<Vec<PlanSummary>> {
        let query = format!("{PLAN_SUMMARY_SQL} ORDER BY p.created_at DESC, p.id DESC");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], Self::build_summary_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan row")?;

        Ok(summaries)
    }

    /// Completion counts for a single plan.
    pub fn get_plan_summary(&self, id: u64) -> Result<Option<PlanSummary>> {
        let query = format!("{PLAN_SUMMARY_SQL} WHERE p.id = ?1");
        self.connection
            .query_row(&query, params![id as i64], Self::build_summary_from_row)
            .optional()
            .db_context("Failed to query plan summary")
    }

    /// Deletes a plan together with its entries and completion records.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        if deleted == 0 {
            return Err(RegimenError::PlanNotFound { id });
        }
        Ok(())
    }
}
