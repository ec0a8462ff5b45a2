//! The ordering invariant for plan entries.

use crate::models::PlanExerciseEntry;

/// Rewrite every entry's `sort_order` to its array index + 1.
///
/// Input order and all other fields are preserved, no entry is created or
/// dropped, and the function is idempotent. This is the only place in the
/// crate that assigns `sort_order`.
pub fn normalize(entries: &[PlanExerciseEntry]) -> Vec<PlanExerciseEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| PlanExerciseEntry {
            sort_order: position(index),
            ..entry.clone()
        })
        .collect()
}

/// Owned variant of [`normalize`] that reuses the allocation.
pub(crate) fn normalize_owned(mut entries: Vec<PlanExerciseEntry>) -> Vec<PlanExerciseEntry> {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.sort_order = position(index);
    }
    entries
}

/// True when `sort_order` already matches array position for every entry.
pub fn is_normalized(entries: &[PlanExerciseEntry]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(index, entry)| entry.sort_order == position(index))
}

fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, sort_order: u32) -> PlanExerciseEntry {
        PlanExerciseEntry {
            sort_order,
            ..PlanExerciseEntry::new(id, 3, 10, "3-0-1-0")
        }
    }

    fn ids_and_orders(entries: &[PlanExerciseEntry]) -> Vec<(&str, u32)> {
        entries
            .iter()
            .map(|e| (e.exercise_id.as_str(), e.sort_order))
            .collect()
    }

    #[test]
    fn test_normalize_rewrites_scattered_orders() {
        let entries = vec![entry("a", 5), entry("b", 10), entry("c", 2)];
        let normalized = normalize(&entries);
        assert_eq!(
            ids_and_orders(&normalized),
            vec![("a", 1), ("b", 2), ("c", 3)]
        );
        // caller's data is untouched
        assert_eq!(entries[0].sort_order, 5);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let entries = vec![entry("x", 0), entry("y", 0), entry("z", 7)];
        let once = normalize(&entries);
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert!(is_normalized(&twice));
    }

    #[test]
    fn test_normalize_preserves_other_fields() {
        let mut original = entry("a", 9);
        original.default_weight = Some(42.5);
        original.tempo = "2-1-2-0".into();
        let normalized = normalize(std::slice::from_ref(&original));
        assert_eq!(normalized[0].default_weight, Some(42.5));
        assert_eq!(normalized[0].tempo, "2-1-2-0");
        assert_eq!(normalized[0].sort_order, 1);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&[]).is_empty());
        assert!(is_normalized(&[]));
    }

    #[test]
    fn test_normalize_owned_matches_borrowed() {
        let entries = vec![entry("a", 3), entry("b", 3)];
        assert_eq!(normalize_owned(entries.clone()), normalize(&entries));
    }

    #[test]
    fn test_is_normalized_detects_gap() {
        assert!(!is_normalized(&[entry("a", 1), entry("b", 3)]));
    }
}
