//! Optimistic completion toggles with whole-snapshot rollback.

use std::{collections::HashSet, sync::Arc};

use jiff::Timestamp;
use log::{debug, info, warn};
use tokio::sync::{broadcast, Mutex};

use super::{
    backend::CompletionBackend,
    cache::{CacheScope, CompletionCache, PlanSnapshot},
};
use crate::{
    error::{RegimenError, Result},
    models::{CompletionKey, CompletionRecord, CompletionRequest, CompletionStatus},
};

const EVENT_CAPACITY: usize = 32;

/// Resolution of a completion mutation, broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// The backend accepted the write; cached views for the plan are stale
    Confirmed { key: CompletionKey },
    /// The backend rejected the write, the plan's records were restored and
    /// marked stale
    RolledBack { key: CompletionKey, reason: String },
}

#[derive(Default)]
struct SyncState {
    cache: CompletionCache,
    stale: HashSet<CacheScope>,
}

impl SyncState {
    fn invalidate_plan(&mut self, plan_id: u64) {
        self.stale.insert(CacheScope::PlanCompletions(plan_id));
        self.stale.insert(CacheScope::PlanSummary(plan_id));
    }
}

struct Shared<B> {
    backend: B,
    state: Mutex<SyncState>,
    events: broadcast::Sender<SyncEvent>,
}

impl<B: CompletionBackend> Shared<B> {
    /// Issue the backend call for an optimistic write and settle the cache.
    async fn resolve(
        &self,
        key: CompletionKey,
        request: CompletionRequest,
        snapshot: PlanSnapshot,
    ) -> Result<CompletionRecord> {
        let outcome = self.backend.set_completion(&key, &request).await;

        let mut state = self.state.lock().await;
        match outcome.into_result() {
            Ok(record) => {
                state.invalidate_plan(key.plan_id);
                drop(state);
                info!(
                    "completion confirmed for plan {} exercise {}",
                    key.plan_id, key.exercise_id
                );
                let _ = self.events.send(SyncEvent::Confirmed { key });
                Ok(record)
            }
            Err(err) => {
                state.cache.restore(snapshot);
                state.invalidate_plan(key.plan_id);
                drop(state);
                warn!(
                    "completion for plan {} exercise {} rolled back: {err}",
                    key.plan_id, key.exercise_id
                );
                let _ = self.events.send(SyncEvent::RolledBack {
                    key,
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }
}

/// Cache of completion records kept in step with a [`CompletionBackend`].
///
/// Toggles for different keys can be in flight at the same time. The state
/// lock is never held across the backend call. Clones share one cache.
pub struct CompletionSync<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for CompletionSync<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: CompletionBackend + 'static> CompletionSync<B> {
    pub fn new(backend: B) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                backend,
                state: Mutex::new(SyncState::default()),
                events,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.shared.backend
    }

    /// Receive a [`SyncEvent`] for every resolved mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.shared.events.subscribe()
    }

    /// Record whether the exercise at `key` was performed.
    ///
    /// The optimistic record is visible to readers until the backend answers.
    /// Either way the plan's cached views are marked stale once it does, so
    /// the next [`refresh`](Self::refresh) refetches. On success the
    /// backend's record is returned; it is not written into the cache. On
    /// failure the plan's record set is restored to the snapshot taken by
    /// this call and the error is returned. Failed attempts are not retried.
    ///
    /// Once the optimistic record is written, the backend call and its
    /// resolution run on a spawned task. Dropping the returned future only
    /// discards the result; the cache is still confirmed or rolled back and
    /// the [`SyncEvent`] is still sent.
    pub async fn set_completion(
        &self,
        key: CompletionKey,
        request: CompletionRequest,
    ) -> Result<CompletionRecord> {
        let snapshot = {
            let mut state = self.shared.state.lock().await;
            let snapshot = state.cache.snapshot(key.plan_id);
            state.cache.put(request.to_record(&key, Timestamp::now()));
            snapshot
        };
        debug!(
            "optimistic completion write for plan {} exercise {} (completed: {})",
            key.plan_id, key.exercise_id, request.completed
        );

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.resolve(key, request, snapshot).await })
            .await
            .map_err(RegimenError::join_error)?
    }

    /// Load a plan's records from the backend when they are missing or
    /// stale, or unconditionally with `force`.
    pub async fn refresh(&self, plan_id: u64, force: bool) -> Result<Vec<CompletionRecord>> {
        {
            let state = self.shared.state.lock().await;
            let fresh = state.cache.contains_plan(plan_id)
                && !state.stale.contains(&CacheScope::PlanCompletions(plan_id));
            if fresh && !force {
                return Ok(state.cache.plan_records(plan_id));
            }
        }

        debug!("refetching completion records for plan {plan_id}");
        let records = self
            .shared
            .backend
            .fetch_completions(plan_id)
            .await
            .into_result()?;

        let mut state = self.shared.state.lock().await;
        state.cache.replace_plan(plan_id, records);
        state.stale.remove(&CacheScope::PlanCompletions(plan_id));
        Ok(state.cache.plan_records(plan_id))
    }

    pub async fn record(&self, key: &CompletionKey) -> Option<CompletionRecord> {
        self.shared.state.lock().await.cache.get(key).cloned()
    }

    pub async fn status(&self, key: &CompletionKey) -> CompletionStatus {
        CompletionStatus::of(self.shared.state.lock().await.cache.get(key))
    }

    /// Cached records of a plan without contacting the backend.
    pub async fn records(&self, plan_id: u64) -> Vec<CompletionRecord> {
        self.shared.state.lock().await.cache.plan_records(plan_id)
    }

    pub async fn is_stale(&self, scope: CacheScope) -> bool {
        self.shared.state.lock().await.stale.contains(&scope)
    }

    /// Consumers call this after reloading a view they own, such as the
    /// plan summary.
    pub async fn mark_fresh(&self, scope: CacheScope) {
        self.shared.state.lock().await.stale.remove(&scope);
    }

    /// Copy of every cached record set. Stale marks are not included.
    pub async fn cache_snapshot(&self) -> CompletionCache {
        self.shared.state.lock().await.cache.clone()
    }
}
