//! Running-order position sequencing.
//!
//! Positions within a round are always the contiguous set {1..N},
//! regardless of entry status (scratched entries keep their slot).
//! Everything here is pure: functions take the round's current order and
//! return the full batch of position assignments for the caller to persist
//! in one transaction. If that persist fails, the caller must reload the
//! round from storage; no partial local state is trusted after a failed
//! write.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// One (selection, position) pair in a renumbering batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAssignment {
    pub selection_id: DbId,
    pub running_position: i32,
}

/// Position for a selection appended to a round: max existing position
/// plus one, or 1 for an empty round.
pub fn next_position(existing_positions: &[i32]) -> i32 {
    existing_positions.iter().copied().max().unwrap_or(0) + 1
}

/// Assign contiguous positions 1..N to `ordered_ids` in list order.
pub fn renumber(ordered_ids: &[DbId]) -> Vec<PositionAssignment> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(index, &selection_id)| PositionAssignment {
            selection_id,
            running_position: (index + 1) as i32,
        })
        .collect()
}

/// Move one selection to `target_position` and renumber the round.
///
/// `ordered_ids` must be the round's selections in current position order.
/// The moved id is removed, inserted at `target_position - 1` in the
/// remaining list (clamped to the end when the target exceeds the round
/// size), and the whole round is renumbered 1..N. The full batch is
/// returned so the caller can persist it as one unit.
pub fn reorder(
    ordered_ids: &[DbId],
    moved_id: DbId,
    target_position: i32,
) -> Result<Vec<PositionAssignment>, CoreError> {
    if target_position < 1 {
        return Err(CoreError::Validation(format!(
            "target_position must be at least 1, got {target_position}"
        )));
    }

    let mut remaining: Vec<DbId> = ordered_ids
        .iter()
        .copied()
        .filter(|&id| id != moved_id)
        .collect();
    if remaining.len() == ordered_ids.len() {
        return Err(CoreError::NotFound {
            entity: "Selection",
            id: moved_id,
        });
    }

    let insert_at = ((target_position - 1) as usize).min(remaining.len());
    remaining.insert(insert_at, moved_id);

    Ok(renumber(&remaining))
}

/// Verify that `positions` form the contiguous set {1..N}.
pub fn verify_contiguous(positions: &[i32]) -> Result<(), CoreError> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    for (index, &position) in sorted.iter().enumerate() {
        let expected = (index + 1) as i32;
        if position != expected {
            return Err(CoreError::Conflict(format!(
                "Running positions are not contiguous: expected {expected}, found {position}"
            )));
        }
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn positions(batch: &[PositionAssignment]) -> Vec<i32> {
        batch.iter().map(|a| a.running_position).collect()
    }

    fn ids(batch: &[PositionAssignment]) -> Vec<DbId> {
        batch.iter().map(|a| a.selection_id).collect()
    }

    // -----------------------------------------------------------------------
    // Append
    // -----------------------------------------------------------------------

    #[test]
    fn append_to_empty_round_yields_one() {
        assert_eq!(next_position(&[]), 1);
    }

    #[test]
    fn append_yields_max_plus_one() {
        assert_eq!(next_position(&[1, 2, 3]), 4);
    }

    #[test]
    fn append_uses_max_even_with_gaps() {
        // Defensive behavior against a corrupted sequence: still past the max.
        assert_eq!(next_position(&[1, 5]), 6);
    }

    // -----------------------------------------------------------------------
    // Reorder
    // -----------------------------------------------------------------------

    #[test]
    fn reorder_moves_last_to_front() {
        // Round: [Alice#1, Bob#2, Carol#3]; move Carol to position 1.
        let batch = reorder(&[10, 20, 30], 30, 1).unwrap();
        assert_eq!(ids(&batch), vec![30, 10, 20]);
        assert_eq!(positions(&batch), vec![1, 2, 3]);
    }

    #[test]
    fn reorder_moves_first_to_middle() {
        let batch = reorder(&[10, 20, 30], 10, 2).unwrap();
        assert_eq!(ids(&batch), vec![20, 10, 30]);
    }

    #[test]
    fn reorder_to_same_position_is_identity() {
        let batch = reorder(&[10, 20, 30], 20, 2).unwrap();
        assert_eq!(ids(&batch), vec![10, 20, 30]);
        assert_eq!(positions(&batch), vec![1, 2, 3]);
    }

    #[test]
    fn reorder_target_beyond_end_clamps_to_last() {
        let batch = reorder(&[10, 20, 30], 10, 99).unwrap();
        assert_eq!(ids(&batch), vec![20, 30, 10]);
        assert_eq!(positions(&batch), vec![1, 2, 3]);
    }

    #[test]
    fn reorder_unknown_selection_not_found() {
        assert_matches!(
            reorder(&[10, 20], 99, 1),
            Err(CoreError::NotFound { entity: "Selection", id: 99 })
        );
    }

    #[test]
    fn reorder_target_below_one_rejected() {
        assert_matches!(reorder(&[10, 20], 10, 0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reorder_single_entry_round() {
        let batch = reorder(&[10], 10, 1).unwrap();
        assert_eq!(positions(&batch), vec![1]);
    }

    // -----------------------------------------------------------------------
    // Contiguity
    // -----------------------------------------------------------------------

    #[test]
    fn reorder_always_yields_contiguous_positions() {
        for target in 1..=5 {
            let batch = reorder(&[1, 2, 3, 4], 3, target).unwrap();
            let p = positions(&batch);
            assert!(verify_contiguous(&p).is_ok(), "target {target} broke contiguity");
        }
    }

    #[test]
    fn verify_contiguous_accepts_empty() {
        assert!(verify_contiguous(&[]).is_ok());
    }

    #[test]
    fn verify_contiguous_accepts_unordered_input() {
        assert!(verify_contiguous(&[3, 1, 2]).is_ok());
    }

    #[test]
    fn verify_contiguous_rejects_gap() {
        assert_matches!(verify_contiguous(&[1, 2, 4]), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn verify_contiguous_rejects_duplicate() {
        assert_matches!(verify_contiguous(&[1, 2, 2]), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn verify_contiguous_rejects_zero_start() {
        assert_matches!(verify_contiguous(&[0, 1, 2]), Err(CoreError::Conflict(_)));
    }

    // -----------------------------------------------------------------------
    // Round scoping
    // -----------------------------------------------------------------------

    #[test]
    fn two_rounds_may_both_start_at_position_one() {
        // Positions are computed per round; distinct rounds each get a #1.
        let round_a = renumber(&[10, 20]);
        let round_b = renumber(&[30]);
        assert_eq!(round_a[0].running_position, 1);
        assert_eq!(round_b[0].running_position, 1);
    }
}
