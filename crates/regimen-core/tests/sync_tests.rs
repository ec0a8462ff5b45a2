mod common;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use jiff::Timestamp;
use regimen_core::{
    params::{AddEntries, CreatePlan},
    CacheScope, CompletionBackend, CompletionKey, CompletionRecord, CompletionRequest,
    CompletionStatus, CompletionSync, FieldError, RegimenError, RemoteFailureKind, RemoteOutcome,
    SyncEvent,
};
use tokio::sync::oneshot;

use crate::common::{create_test_planner, seed_catalog};

const PLAN: u64 = 1;

struct Gate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<RemoteOutcome<CompletionRecord>>,
}

/// Test-side handle for one held mutation.
struct Control {
    entered: oneshot::Receiver<()>,
    release: oneshot::Sender<RemoteOutcome<CompletionRecord>>,
}

impl Control {
    async fn wait_in_flight(&mut self) {
        (&mut self.entered)
            .await
            .expect("backend call never started");
    }

    fn resolve(self, outcome: RemoteOutcome<CompletionRecord>) {
        let _ = self.release.send(outcome);
    }
}

/// Backend double: mutations for gated exercises block until the test
/// resolves them, everything else succeeds immediately.
#[derive(Default)]
struct ScriptedBackend {
    gates: Mutex<HashMap<String, Gate>>,
    remote: Mutex<Vec<CompletionRecord>>,
    fetches: AtomicUsize,
}

impl ScriptedBackend {
    fn with_remote(records: Vec<CompletionRecord>) -> Self {
        Self {
            remote: Mutex::new(records),
            ..Default::default()
        }
    }

    fn gate(&self, exercise_id: &str) -> Control {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(
            exercise_id.to_string(),
            Gate {
                entered: entered_tx,
                release: release_rx,
            },
        );
        Control {
            entered: entered_rx,
            release: release_tx,
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn set_completion(
        &self,
        key: &CompletionKey,
        request: &CompletionRequest,
    ) -> RemoteOutcome<CompletionRecord> {
        let gate = self.gates.lock().unwrap().remove(&key.exercise_id);
        match gate {
            Some(gate) => {
                let _ = gate.entered.send(());
                gate.release
                    .await
                    .unwrap_or_else(|_| RemoteOutcome::ServerError("gate dropped".to_string()))
            }
            None => RemoteOutcome::Ok(request.to_record(key, Timestamp::now())),
        }
    }

    async fn fetch_completions(&self, plan_id: u64) -> RemoteOutcome<Vec<CompletionRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let records = self.remote.lock().unwrap();
        RemoteOutcome::Ok(
            records
                .iter()
                .filter(|r| r.plan_id == plan_id)
                .cloned()
                .collect(),
        )
    }
}

fn skipped_record(exercise_id: &str) -> CompletionRecord {
    CompletionRequest::skipped(Some("time".to_string()), None)
        .to_record(&CompletionKey::new(PLAN, exercise_id), Timestamp::now())
}

fn spawn_set(
    sync: &Arc<CompletionSync<ScriptedBackend>>,
    exercise_id: &str,
    request: CompletionRequest,
) -> tokio::task::JoinHandle<regimen_core::Result<CompletionRecord>> {
    let sync = Arc::clone(sync);
    let key = CompletionKey::new(PLAN, exercise_id);
    tokio::spawn(async move { sync.set_completion(key, request).await })
}

#[tokio::test]
async fn test_optimistic_value_visible_until_confirmed() {
    let sync = Arc::new(CompletionSync::new(ScriptedBackend::default()));
    let mut events = sync.subscribe();
    let key = CompletionKey::new(PLAN, "squat");
    let mut control = sync.backend().gate("squat");

    assert_eq!(sync.status(&key).await, CompletionStatus::Unknown);
    let task = spawn_set(&sync, "squat", CompletionRequest::completed());

    control.wait_in_flight().await;
    assert_eq!(sync.status(&key).await, CompletionStatus::Completed);
    assert!(!sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);

    let server = CompletionRequest::completed().to_record(&key, Timestamp::now());
    control.resolve(RemoteOutcome::Ok(server.clone()));

    let returned = task.await.unwrap().unwrap();
    assert_eq!(returned, server);
    assert!(sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);
    assert!(sync.is_stale(CacheScope::PlanSummary(PLAN)).await);
    assert_eq!(sync.status(&key).await, CompletionStatus::Completed);

    match events.recv().await.unwrap() {
        SyncEvent::Confirmed { key: confirmed } => assert_eq!(confirmed, key),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_restores_exact_prior_cache() {
    let sync = Arc::new(CompletionSync::new(ScriptedBackend::with_remote(vec![
        skipped_record("bench"),
        skipped_record("row"),
    ])));
    sync.refresh(PLAN, false).await.unwrap();
    let before = sync.cache_snapshot().await;
    let mut events = sync.subscribe();

    let key = CompletionKey::new(PLAN, "bench");
    let mut control = sync.backend().gate("bench");
    let task = spawn_set(&sync, "bench", CompletionRequest::completed());

    control.wait_in_flight().await;
    assert_eq!(sync.status(&key).await, CompletionStatus::Completed);
    assert_ne!(sync.cache_snapshot().await, before);

    control.resolve(RemoteOutcome::ServerError("database is locked".to_string()));

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        RegimenError::Remote {
            kind: RemoteFailureKind::ServerError,
            ..
        }
    ));
    assert_eq!(sync.cache_snapshot().await, before);
    assert_eq!(sync.status(&key).await, CompletionStatus::NotCompleted);
    assert!(sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);
    assert!(sync.is_stale(CacheScope::PlanSummary(PLAN)).await);

    match events.recv().await.unwrap() {
        SyncEvent::RolledBack { key: rolled, reason } => {
            assert_eq!(rolled, key);
            assert!(reason.contains("database is locked"));
        }
        other => panic!("unexpected event {other:?}"),
    }

    sync.refresh(PLAN, false).await.unwrap();
    assert_eq!(sync.backend().fetch_count(), 2);
    assert_eq!(sync.cache_snapshot().await, before);
}

#[tokio::test]
async fn test_failure_on_uncached_plan_leaves_cache_empty() {
    let sync = Arc::new(CompletionSync::new(ScriptedBackend::default()));
    let before = sync.cache_snapshot().await;

    let mut control = sync.backend().gate("dip");
    let task = spawn_set(
        &sync,
        "dip",
        CompletionRequest::skipped(Some("unknown".to_string()), None),
    );
    control.wait_in_flight().await;
    control.resolve(RemoteOutcome::ValidationFailed(vec![FieldError::new(
        "reason_id",
        "Unknown completion reason",
    )]));

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        RegimenError::Remote {
            kind: RemoteFailureKind::ValidationFailed,
            ref message,
        } if message.contains("reason_id")
    ));
    assert_eq!(sync.cache_snapshot().await, before);
    assert!(sync.records(PLAN).await.is_empty());
}

#[tokio::test]
async fn test_concurrent_toggles_later_call_fails_first() {
    let sync = Arc::new(CompletionSync::new(ScriptedBackend::default()));
    let mut squat = sync.backend().gate("squat");
    let mut lunge = sync.backend().gate("lunge");

    let first = spawn_set(&sync, "squat", CompletionRequest::completed());
    squat.wait_in_flight().await;
    let second = spawn_set(
        &sync,
        "lunge",
        CompletionRequest::skipped(Some("fatigue".to_string()), None),
    );
    lunge.wait_in_flight().await;

    assert_eq!(sync.records(PLAN).await.len(), 2);

    lunge.resolve(RemoteOutcome::Unauthorized);
    assert!(second.await.unwrap().is_err());

    let squat_key = CompletionKey::new(PLAN, "squat");
    assert_eq!(sync.status(&squat_key).await, CompletionStatus::Completed);
    assert_eq!(
        sync.status(&CompletionKey::new(PLAN, "lunge")).await,
        CompletionStatus::Unknown
    );

    squat.resolve(RemoteOutcome::Ok(
        CompletionRequest::completed().to_record(&squat_key, Timestamp::now()),
    ));
    assert!(first.await.unwrap().is_ok());
    assert_eq!(sync.status(&squat_key).await, CompletionStatus::Completed);
}

#[tokio::test]
async fn test_concurrent_failures_earlier_call_first_recover_on_refresh() {
    let sync = Arc::new(CompletionSync::new(ScriptedBackend::with_remote(vec![
        skipped_record("row"),
    ])));
    sync.refresh(PLAN, false).await.unwrap();
    let before = sync.cache_snapshot().await;

    let mut squat = sync.backend().gate("squat");
    let mut lunge = sync.backend().gate("lunge");
    let squat_key = CompletionKey::new(PLAN, "squat");

    let first = spawn_set(&sync, "squat", CompletionRequest::completed());
    squat.wait_in_flight().await;
    let second = spawn_set(
        &sync,
        "lunge",
        CompletionRequest::skipped(Some("fatigue".to_string()), None),
    );
    lunge.wait_in_flight().await;
    assert_eq!(sync.records(PLAN).await.len(), 3);

    squat.resolve(RemoteOutcome::ServerError("timeout".to_string()));
    assert!(first.await.unwrap().is_err());
    assert_eq!(sync.status(&squat_key).await, CompletionStatus::Unknown);
    assert!(sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);

    // The second snapshot was taken while squat was still optimistic
    lunge.resolve(RemoteOutcome::ServerError("timeout".to_string()));
    assert!(second.await.unwrap().is_err());
    assert!(sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);

    let records = sync.refresh(PLAN, false).await.unwrap();
    assert_eq!(sync.backend().fetch_count(), 2);
    assert_eq!(records.len(), 1);
    assert_eq!(sync.status(&squat_key).await, CompletionStatus::Unknown);
    assert_eq!(
        sync.status(&CompletionKey::new(PLAN, "lunge")).await,
        CompletionStatus::Unknown
    );
    assert_eq!(sync.cache_snapshot().await, before);
}

#[tokio::test]
async fn test_dropped_caller_still_resolves_mutation() {
    let sync = CompletionSync::new(ScriptedBackend::with_remote(vec![skipped_record("row")]));
    sync.refresh(PLAN, false).await.unwrap();
    let before = sync.cache_snapshot().await;
    let mut events = sync.subscribe();

    let key = CompletionKey::new(PLAN, "squat");
    let mut control = sync.backend().gate("squat");

    tokio::select! {
        _ = sync.set_completion(key.clone(), CompletionRequest::completed()) => {
            panic!("mutation resolved before the backend answered")
        }
        _ = control.wait_in_flight() => {}
    }
    assert_eq!(sync.status(&key).await, CompletionStatus::Completed);

    control.resolve(RemoteOutcome::ServerError("connection reset".to_string()));

    match events.recv().await.unwrap() {
        SyncEvent::RolledBack { key: rolled, .. } => assert_eq!(rolled, key),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(sync.cache_snapshot().await, before);
    assert_eq!(sync.status(&key).await, CompletionStatus::Unknown);
    assert!(sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);
}

#[tokio::test]
async fn test_refresh_only_refetches_when_stale_or_forced() {
    let sync = CompletionSync::new(ScriptedBackend::with_remote(vec![skipped_record("row")]));

    let records = sync.refresh(PLAN, false).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(sync.backend().fetch_count(), 1);

    sync.refresh(PLAN, false).await.unwrap();
    assert_eq!(sync.backend().fetch_count(), 1);

    sync.refresh(PLAN, true).await.unwrap();
    assert_eq!(sync.backend().fetch_count(), 2);

    sync.set_completion(CompletionKey::new(PLAN, "row"), CompletionRequest::completed())
        .await
        .unwrap();
    assert!(sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);

    // The backend double does not persist writes, so the refetch restores
    // the remote view.
    let records = sync.refresh(PLAN, false).await.unwrap();
    assert_eq!(sync.backend().fetch_count(), 3);
    assert!(!records[0].is_completed);
    assert!(!sync.is_stale(CacheScope::PlanCompletions(PLAN)).await);

    assert!(sync.is_stale(CacheScope::PlanSummary(PLAN)).await);
    sync.mark_fresh(CacheScope::PlanSummary(PLAN)).await;
    assert!(!sync.is_stale(CacheScope::PlanSummary(PLAN)).await);
}

#[tokio::test]
async fn test_sync_against_planner_backend() {
    let (_temp_dir, planner) = create_test_planner().await;
    seed_catalog(&planner, &["squat", "lunge"]).await;
    let plan = planner
        .create_plan(&CreatePlan {
            title: "Legs".to_string(),
            description: None,
        })
        .await
        .unwrap();
    planner
        .add_entries(&AddEntries {
            plan_id: plan.id,
            exercise_ids: vec!["squat".to_string(), "lunge".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();

    let sync = CompletionSync::new(planner.clone());
    let key = CompletionKey::new(plan.id, "lunge");
    sync.set_completion(
        key.clone(),
        CompletionRequest::skipped(Some("injury".to_string()), Some("knee".to_string())),
    )
    .await
    .unwrap();

    let records = sync.refresh(plan.id, false).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].custom_reason.as_deref(), Some("knee"));
    assert_eq!(sync.status(&key).await, CompletionStatus::NotCompleted);

    let before = sync.cache_snapshot().await;
    let err = sync
        .set_completion(
            CompletionKey::new(plan.id, "deadlift"),
            CompletionRequest::completed(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegimenError::Remote {
            kind: RemoteFailureKind::NotFound,
            ..
        }
    ));
    assert_eq!(sync.cache_snapshot().await, before);
}
