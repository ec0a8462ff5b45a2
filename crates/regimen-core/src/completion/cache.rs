//! Keyed store of completion records with snapshot/restore.

use std::collections::{BTreeMap, HashMap};

use crate::models::{CompletionKey, CompletionRecord};

type PlanRecords = BTreeMap<String, CompletionRecord>;

/// Cached views that can be marked stale after a mutation resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheScope {
    /// The per-plan completion record set held in this cache
    PlanCompletions(u64),
    /// The plan-level aggregate (completion counts) held by consumers
    PlanSummary(u64),
}

/// Record set of one plan captured before an optimistic write.
///
/// `records` is `None` when the plan had never been cached, so restoring the
/// snapshot removes the plan again instead of leaving an empty set behind.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSnapshot {
    plan_id: u64,
    records: Option<PlanRecords>,
}

impl PlanSnapshot {
    pub fn plan_id(&self) -> u64 {
        self.plan_id
    }
}

/// At most one record per `(plan_id, exercise_id)`.
///
/// Only records live here; staleness is tracked by
/// [`CompletionSync`](super::CompletionSync) so that comparing two caches
/// compares record sets alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionCache {
    plans: HashMap<u64, PlanRecords>,
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CompletionKey) -> Option<&CompletionRecord> {
        self.plans
            .get(&key.plan_id)
            .and_then(|records| records.get(&key.exercise_id))
    }

    /// Records cached for a plan, ordered by exercise id.
    pub fn plan_records(&self, plan_id: u64) -> Vec<CompletionRecord> {
        self.plans
            .get(&plan_id)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_plan(&self, plan_id: u64) -> bool {
        self.plans.contains_key(&plan_id)
    }

    /// Insert or wholesale-replace the record for its key.
    pub fn put(&mut self, record: CompletionRecord) {
        self.plans
            .entry(record.plan_id)
            .or_default()
            .insert(record.exercise_id.clone(), record);
    }

    /// Replace a plan's whole record set with authoritative data.
    pub fn replace_plan(&mut self, plan_id: u64, records: Vec<CompletionRecord>) {
        let records = records
            .into_iter()
            .filter(|r| r.plan_id == plan_id)
            .map(|r| (r.exercise_id.clone(), r))
            .collect();
        self.plans.insert(plan_id, records);
    }

    pub fn snapshot(&self, plan_id: u64) -> PlanSnapshot {
        PlanSnapshot {
            plan_id,
            records: self.plans.get(&plan_id).cloned(),
        }
    }

    /// Put a plan's record set back exactly as captured.
    pub fn restore(&mut self, snapshot: PlanSnapshot) {
        match snapshot.records {
            Some(records) => {
                self.plans.insert(snapshot.plan_id, records);
            }
            None => {
                self.plans.remove(&snapshot.plan_id);
            }
        }
    }
}
