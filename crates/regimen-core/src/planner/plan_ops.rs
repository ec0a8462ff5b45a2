//! Catalog and plan operations for the Planner.

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{RegimenError, Result},
    models::{ExerciseRef, Plan, PlanSummary},
    params::{CreateExercise, CreatePlan, DeletePlan, Id},
};

impl Planner {
    /// Adds an exercise definition to the catalog, replacing the name and
    /// default weight of an existing definition with the same id.
    pub async fn add_exercise(&self, params: &CreateExercise) -> Result<ExerciseRef> {
        let params = params.clone();
        self.with_db(move |db| {
            db.upsert_exercise(&params.id, &params.name, params.default_weight)
        })
        .await
    }

    /// Lists the exercise catalog.
    pub async fn list_exercises(&self) -> Result<Vec<ExerciseRef>> {
        self.with_db(|db| db.list_exercises()).await
    }

    /// Resolves catalog snapshots for `ids`, in order.
    pub async fn get_exercises(&self, ids: &[String]) -> Result<Vec<ExerciseRef>> {
        let ids = ids.to_vec();
        self.with_db(move |db| db.get_exercises(&ids)).await
    }

    /// Creates a new, empty plan.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let params = params.clone();
        self.with_db(move |db| db.create_plan(&params.title, params.description.as_deref()))
            .await
    }

    /// Retrieves a plan with its entries.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        self.with_db(move |db| db.get_plan(id)).await
    }

    /// Retrieves a plan, failing with `PlanNotFound` when it does not exist.
    pub async fn require_plan(&self, params: &Id) -> Result<Plan> {
        self.get_plan(params)
            .await?
            .ok_or(RegimenError::PlanNotFound { id: params.id })
    }

    /// Lists all plans with completion counts.
    pub async fn list_plan_summaries(&self) -> Result<PlanSummaries> {
        let summaries = self.with_db(|db| db.list_plan_summaries()).await?;
        Ok(PlanSummaries(summaries))
    }

    /// Loads the plan-level aggregate for one plan.
    pub async fn plan_summary(&self, params: &Id) -> Result<Option<PlanSummary>> {
        let id = params.id;
        self.with_db(move |db| db.get_plan_summary(id)).await
    }

    /// Permanently deletes a plan with its entries and completion records.
    ///
    /// # Errors
    ///
    /// `RegimenError::InvalidInput` when the deletion was not confirmed.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Plan> {
        if !params.confirmed {
            return Err(RegimenError::invalid_input("confirm")
                .with_reason("Deletion must be confirmed"));
        }

        let id = params.id;
        self.with_db(move |db| {
            let plan = db.get_plan(id)?.ok_or(RegimenError::PlanNotFound { id })?;
            db.delete_plan(id)?;
            Ok(plan)
        })
        .await
    }
}
