//! Entry editing operations for the Planner.
//!
//! Every operation follows the same cycle: load the persisted plan into an
//! [`EditSession`], apply one edit, build the update command from the diff
//! against the persisted entries, and store it in a single transaction.

use super::Planner;
use crate::{
    editor::EditSession,
    error::{RegimenError, Result},
    models::{ExerciseRef, Plan},
    params::{position_to_index, AddEntries, MoveEntry, RemoveEntry, UpdateEntry},
    reconcile::{PlanDiff, UpdatePlanCommand},
};

/// Outcome of one saved edit.
#[derive(Debug, Clone)]
pub struct EditResult {
    /// The plan as persisted after the edit
    pub plan: Plan,
    /// Membership changes that were sent
    pub diff: PlanDiff,
    /// Requested exercises skipped because the plan already had them
    pub skipped: Vec<ExerciseRef>,
    /// Field-level descriptions of in-place updates
    pub changes: Vec<String>,
}

impl Planner {
    /// Loads a plan into a fresh edit session.
    pub async fn open_session(&self, plan_id: u64) -> Result<EditSession> {
        self.with_db(move |db| {
            if !db.plan_exists(plan_id)? {
                return Err(RegimenError::PlanNotFound { id: plan_id });
            }
            Ok(EditSession::load(plan_id, &db.get_entries(plan_id)?))
        })
        .await
    }

    /// Persists a pre-built update command.
    pub async fn apply_update(&self, command: UpdatePlanCommand) -> Result<()> {
        self.with_db(move |db| db.apply_update_command(&command)).await
    }

    /// Builds, persists and adopts the session's pending edits.
    ///
    /// The session keeps its unsaved buffer when validation or the store
    /// rejects the command.
    pub async fn save_session(&self, session: &mut EditSession) -> Result<PlanDiff> {
        let command = session.build_command()?;
        let diff = command.diff();
        self.apply_update(command).await?;
        session.mark_persisted();
        Ok(diff)
    }

    async fn commit(
        &self,
        mut session: EditSession,
        skipped: Vec<ExerciseRef>,
        changes: Vec<String>,
    ) -> Result<EditResult> {
        let diff = self.save_session(&mut session).await?;
        let plan_id = session.plan_id();
        let plan = self
            .with_db(move |db| db.get_plan(plan_id))
            .await?
            .ok_or(RegimenError::PlanNotFound { id: plan_id })?;

        Ok(EditResult {
            plan,
            diff,
            skipped,
            changes,
        })
    }

    /// Appends catalog exercises to a plan, skipping ones it already has.
    pub async fn add_entries(&self, params: &AddEntries) -> Result<EditResult> {
        if params.exercise_ids.is_empty() {
            return Err(RegimenError::invalid_input("exercise_ids")
                .with_reason("At least one exercise is required"));
        }

        let refs = self.get_exercises(&params.exercise_ids).await?;
        let mut session = self.open_session(params.plan_id).await?;
        let skipped = session.add_exercises(&refs, &params.defaults(&self.add_defaults));
        self.commit(session, skipped, Vec::new()).await
    }

    /// Removes the entry at a 1-based position.
    pub async fn remove_entry(&self, params: &RemoveEntry) -> Result<EditResult> {
        let index = position_to_index(params.position)?;
        let mut session = self.open_session(params.plan_id).await?;
        session.remove(index)?;
        self.commit(session, Vec::new(), Vec::new()).await
    }

    /// Updates sets, reps, tempo or weight of the entry at a 1-based
    /// position.
    pub async fn update_entry(&self, params: &UpdateEntry) -> Result<EditResult> {
        let index = position_to_index(params.position)?;
        let patch = params.to_patch()?;
        let mut session = self.open_session(params.plan_id).await?;
        session.update(index, &patch)?;
        self.commit(session, Vec::new(), patch.describe()).await
    }

    /// Moves an entry between 1-based positions.
    pub async fn move_entry(&self, params: &MoveEntry) -> Result<EditResult> {
        let from = position_to_index(params.from)?;
        let to = position_to_index(params.to)?;
        let mut session = self.open_session(params.plan_id).await?;
        session.move_entry(from, to)?;
        let change = format!("Moved position {} to {}", params.from, params.to);
        self.commit(session, Vec::new(), vec![change]).await
    }
}
