//! Boundary to the authoritative completion store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{CompletionKey, CompletionRecord, CompletionRequest, RemoteOutcome};

/// Remote store for completion records.
///
/// Implementations report every outcome through [`RemoteOutcome`]; transport
/// details such as status codes stay behind this trait.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Persist a full replacement record for `key`.
    async fn set_completion(
        &self,
        key: &CompletionKey,
        request: &CompletionRequest,
    ) -> RemoteOutcome<CompletionRecord>;

    /// Fetch every record stored for `plan_id`.
    async fn fetch_completions(&self, plan_id: u64) -> RemoteOutcome<Vec<CompletionRecord>>;
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Arc<T> {
    async fn set_completion(
        &self,
        key: &CompletionKey,
        request: &CompletionRequest,
    ) -> RemoteOutcome<CompletionRecord> {
        (**self).set_completion(key, request).await
    }

    async fn fetch_completions(&self, plan_id: u64) -> RemoteOutcome<Vec<CompletionRecord>> {
        (**self).fetch_completions(plan_id).await
    }
}
