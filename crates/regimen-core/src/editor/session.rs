//! A single editing session over one plan's exercise list.

use log::debug;

use super::{
    guard::partition_new,
    normalize,
    ops::{self, AddDefaults},
};
use crate::{
    error::{RegimenError, Result},
    models::{EntryPatch, ExerciseRef, PlanExerciseEntry},
    reconcile::{PlanDiff, UpdatePlanCommand},
};

/// Edit buffer plus the last collection known to be persisted.
///
/// The buffer belongs to this session alone. Each editing method swaps in a
/// new buffer only after the underlying operation succeeds, so a rejected
/// edit leaves the session exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    plan_id: u64,
    original: Vec<PlanExerciseEntry>,
    entries: Vec<PlanExerciseEntry>,
}

impl EditSession {
    /// Start a session from the persisted entries of `plan_id`.
    pub fn load(plan_id: u64, persisted: &[PlanExerciseEntry]) -> Self {
        let original = normalize(persisted);
        Self {
            plan_id,
            entries: original.clone(),
            original,
        }
    }

    pub fn plan_id(&self) -> u64 {
        self.plan_id
    }

    /// Current buffer.
    pub fn entries(&self) -> &[PlanExerciseEntry] {
        &self.entries
    }

    /// Baseline the buffer is diffed against.
    pub fn original(&self) -> &[PlanExerciseEntry] {
        &self.original
    }

    /// Append catalog exercises that are not yet in the buffer.
    ///
    /// Returns the references that were skipped as duplicates so the caller
    /// can tell the user.
    pub fn add_exercises(&mut self, refs: &[ExerciseRef], defaults: &AddDefaults) -> Vec<ExerciseRef> {
        let (fresh, skipped) = partition_new(&self.entries, refs);
        if !skipped.is_empty() {
            debug!(
                "plan {}: skipping {} duplicate exercise(s)",
                self.plan_id,
                skipped.len()
            );
        }
        self.entries = ops::add_many(&self.entries, &fresh, defaults);
        skipped
    }

    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.entries = ops::remove_at(&self.entries, index)?;
        Ok(())
    }

    pub fn update(&mut self, index: usize, patch: &EntryPatch) -> Result<()> {
        self.entries = ops::update_at(&self.entries, index, patch)?;
        Ok(())
    }

    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        self.entries = ops::move_entry(&self.entries, from, to)?;
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.entries = ops::swap_entries(&self.entries, a, b)?;
        Ok(())
    }

    /// Replace the buffer with an externally reordered sequence.
    ///
    /// # Errors
    ///
    /// `RegimenError::InvalidInput` when `entries` is not a permutation of
    /// the buffered exercises.
    pub fn reorder(&mut self, entries: &[PlanExerciseEntry]) -> Result<()> {
        if exercise_ids(entries) != exercise_ids(&self.entries) {
            return Err(RegimenError::invalid_input("entries")
                .with_reason("Reordered entries must contain exactly the exercises of the plan"));
        }
        self.entries = ops::reorder(entries);
        Ok(())
    }

    /// True when the buffer differs from the baseline in any field or order.
    pub fn is_dirty(&self) -> bool {
        self.entries != self.original
    }

    pub fn diff(&self) -> PlanDiff {
        PlanDiff::between(&self.original, &self.entries)
    }

    /// Validate the buffer and build the persisted update command.
    pub fn build_command(&self) -> Result<UpdatePlanCommand> {
        UpdatePlanCommand::build(self.plan_id, &self.original, &self.entries)
    }

    /// Adopt the buffer as the new baseline after a successful save.
    pub fn mark_persisted(&mut self) {
        self.original = self.entries.clone();
    }

    /// Throw away unsaved edits.
    pub fn discard(&mut self) {
        self.entries = self.original.clone();
    }
}

fn exercise_ids(entries: &[PlanExerciseEntry]) -> Vec<&str> {
    let mut ids: Vec<_> = entries.iter().map(|e| e.exercise_id.as_str()).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegimenError;

    fn persisted() -> Vec<PlanExerciseEntry> {
        ["squat", "bench", "row"]
            .iter()
            .enumerate()
            .map(|(i, id)| PlanExerciseEntry {
                sort_order: (i as u32 + 1) * 10,
                ..PlanExerciseEntry::new(*id, 3, 10, "3-0-1-0")
            })
            .collect()
    }

    #[test]
    fn test_load_normalizes_baseline() {
        let session = EditSession::load(1, &persisted());
        assert_eq!(session.original()[2].sort_order, 3);
        assert!(!session.is_dirty());
        assert!(session.diff().is_empty());
    }

    #[test]
    fn test_add_exercises_skips_duplicates() {
        let mut session = EditSession::load(1, &persisted());
        let skipped = session.add_exercises(
            &[ExerciseRef::new("bench", "Bench"), ExerciseRef::new("dip", "Dip")],
            &AddDefaults::default(),
        );
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].id, "bench");
        assert_eq!(session.entries().len(), 4);
        assert_eq!(session.entries()[3].exercise_id, "dip");
        assert_eq!(session.diff().added.len(), 1);
    }

    #[test]
    fn test_failed_edit_leaves_buffer_untouched() {
        let mut session = EditSession::load(1, &persisted());
        session.remove(0).unwrap();
        let before = session.entries().to_vec();
        let err = session.remove(9).unwrap_err();
        assert!(matches!(err, RegimenError::IndexOutOfBounds { .. }));
        assert_eq!(session.entries(), before.as_slice());
    }

    #[test]
    fn test_reorder_only_is_dirty_but_membership_unchanged() {
        let mut session = EditSession::load(1, &persisted());
        session.move_entry(2, 0).unwrap();
        assert!(session.is_dirty());
        assert!(session.diff().is_empty());
        let command = session.build_command().unwrap();
        assert_eq!(command.entries[0].exercise_id, "row");
        assert_eq!(command.entries[0].sort_order, 1);
    }

    #[test]
    fn test_build_command_validates_buffer() {
        let mut session = EditSession::load(1, &persisted());
        session
            .update(
                1,
                &EntryPatch {
                    sets: Some(0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(matches!(
            session.build_command(),
            Err(RegimenError::Validation { .. })
        ));
    }

    #[test]
    fn test_mark_persisted_and_discard() {
        let mut session = EditSession::load(1, &persisted());
        session.remove(1).unwrap();
        session.mark_persisted();
        assert!(!session.is_dirty());
        assert_eq!(session.original().len(), 2);

        session.swap(0, 1).unwrap();
        assert!(session.is_dirty());
        session.discard();
        assert!(!session.is_dirty());
        assert_eq!(session.entries()[0].exercise_id, "squat");
    }

    #[test]
    fn test_reorder_from_external_sequence() {
        let mut session = EditSession::load(1, &persisted());
        let mut shuffled = session.entries().to_vec();
        shuffled.rotate_left(1);
        session.reorder(&shuffled).unwrap();
        let orders: Vec<_> = session.entries().iter().map(|e| e.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(session.entries()[0].exercise_id, "bench");
    }

    #[test]
    fn test_reorder_rejects_changed_membership() {
        let mut session = EditSession::load(1, &persisted());
        let before = session.entries().to_vec();

        let mut dropped = before.clone();
        dropped.pop();
        let mut duplicated = before.clone();
        duplicated[2] = duplicated[0].clone();
        let mut foreign = before.clone();
        foreign.push(PlanExerciseEntry::new("dip", 3, 10, "3-0-1-0"));

        for candidate in [dropped, duplicated, foreign] {
            let err = session.reorder(&candidate).unwrap_err();
            assert!(matches!(err, RegimenError::InvalidInput { ref field, .. } if field == "entries"));
            assert_eq!(session.entries(), before.as_slice());
        }
    }
}
