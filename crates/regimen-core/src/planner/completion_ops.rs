//! Completion operations for the Planner.

use async_trait::async_trait;

use super::Planner;
use crate::{
    completion::CompletionBackend,
    error::{RegimenError, Result},
    models::{CompletionKey, CompletionReason, CompletionRecord, CompletionRequest, RemoteOutcome},
    params::Id,
};

impl Planner {
    /// Lists the predefined non-completion reasons.
    pub async fn list_reasons(&self) -> Result<Vec<CompletionReason>> {
        self.with_db(|db| db.list_reasons()).await
    }

    /// Retrieves every completion record of a plan.
    pub async fn get_completions(&self, params: &Id) -> Result<Vec<CompletionRecord>> {
        let plan_id = params.id;
        self.with_db(move |db| db.get_completions(plan_id)).await
    }
}

#[async_trait]
impl CompletionBackend for Planner {
    async fn set_completion(
        &self,
        key: &CompletionKey,
        request: &CompletionRequest,
    ) -> RemoteOutcome<CompletionRecord> {
        let key = key.clone();
        let request = request.clone();
        self.with_db(move |db| db.upsert_completion(&key, &request))
            .await
            .into()
    }

    async fn fetch_completions(&self, plan_id: u64) -> RemoteOutcome<Vec<CompletionRecord>> {
        self.with_db(move |db| {
            if !db.plan_exists(plan_id)? {
                return Err(RegimenError::PlanNotFound { id: plan_id });
            }
            db.get_completions(plan_id)
        })
        .await
        .into()
    }
}
