//! Entry participation status state machine.
//!
//! A selection's status governs how it is counted and displayed, never
//! where it sits: status changes do not renumber siblings, so the
//! running-order invariant in [`crate::sequencing`] is untouched by
//! anything in this module.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entry status
// ---------------------------------------------------------------------------

/// Competitor is entered and expected to run. Initial state.
pub const STATUS_ENTERED: &str = "entered";

/// Competitor scratched before running; keeps its slot in the order.
pub const STATUS_SCRATCHED: &str = "scratched";

/// Competitor did not show at the line.
pub const STATUS_ABSENT: &str = "absent";

/// Entry removed from the trial. The row is kept for score/audit history.
pub const STATUS_WITHDRAWN: &str = "withdrawn";

/// All valid entry status values.
pub const VALID_ENTRY_STATUSES: &[&str] = &[
    STATUS_ENTERED,
    STATUS_SCRATCHED,
    STATUS_ABSENT,
    STATUS_WITHDRAWN,
];

/// Marker shown in place of a numeric running position for scratched entries.
pub const SCRATCH_MARKER: &str = "X";

/// Participation status of a selection within its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Entered,
    Scratched,
    Absent,
    Withdrawn,
}

impl EntryStatus {
    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entered => STATUS_ENTERED,
            Self::Scratched => STATUS_SCRATCHED,
            Self::Absent => STATUS_ABSENT,
            Self::Withdrawn => STATUS_WITHDRAWN,
        }
    }

    /// Parse from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_ENTERED => Ok(Self::Entered),
            STATUS_SCRATCHED => Ok(Self::Scratched),
            STATUS_ABSENT => Ok(Self::Absent),
            STATUS_WITHDRAWN => Ok(Self::Withdrawn),
            _ => Err(CoreError::Validation(format!(
                "Invalid entry status '{s}'. Must be one of: {}",
                VALID_ENTRY_STATUSES.join(", ")
            ))),
        }
    }

    /// Returns the set of statuses reachable from `self`.
    ///
    /// Withdrawn is terminal: the observed workflow never moves an entry
    /// back out of it, so it returns the empty slice.
    pub fn valid_transitions(self) -> &'static [EntryStatus] {
        match self {
            Self::Entered => &[Self::Scratched, Self::Absent, Self::Withdrawn],
            Self::Scratched => &[Self::Entered],
            Self::Absent => &[Self::Entered],
            Self::Withdrawn => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(self, to: EntryStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a status transition, returning a descriptive error for
    /// invalid ones.
    pub fn validate_transition(self, to: EntryStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Invalid status transition: {} -> {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }

    /// Whether this entry counts toward active-entry totals and capacity.
    pub fn counts_toward_active(self) -> bool {
        !matches!(self, Self::Withdrawn)
    }

    /// The running-position marker for display: the numeric position, or
    /// `"X"` for scratched entries.
    pub fn position_marker(self, running_position: i32) -> String {
        match self {
            Self::Scratched => SCRATCH_MARKER.to_string(),
            _ => running_position.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry type
// ---------------------------------------------------------------------------

/// Entry runs toward title credit.
pub const ENTRY_TYPE_REGULAR: &str = "regular";

/// For Exhibition Only: runs but is not judged toward title credit.
pub const ENTRY_TYPE_FEO: &str = "feo";

/// All valid entry type values.
pub const VALID_ENTRY_TYPES: &[&str] = &[ENTRY_TYPE_REGULAR, ENTRY_TYPE_FEO];

/// How an entry participates: a regular judged run or exhibition-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Regular,
    Feo,
}

impl EntryType {
    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => ENTRY_TYPE_REGULAR,
            Self::Feo => ENTRY_TYPE_FEO,
        }
    }

    /// Parse from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            ENTRY_TYPE_REGULAR => Ok(Self::Regular),
            ENTRY_TYPE_FEO => Ok(Self::Feo),
            _ => Err(CoreError::Validation(format!(
                "Invalid entry type '{s}'. Must be one of: {}",
                VALID_ENTRY_TYPES.join(", ")
            ))),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn entered_to_scratched_and_back() {
        assert!(EntryStatus::Entered.can_transition(EntryStatus::Scratched));
        assert!(EntryStatus::Scratched.can_transition(EntryStatus::Entered));
    }

    #[test]
    fn entered_to_absent_and_back() {
        assert!(EntryStatus::Entered.can_transition(EntryStatus::Absent));
        assert!(EntryStatus::Absent.can_transition(EntryStatus::Entered));
    }

    #[test]
    fn entered_to_withdrawn() {
        assert!(EntryStatus::Entered.can_transition(EntryStatus::Withdrawn));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn withdrawn_is_terminal() {
        assert!(EntryStatus::Withdrawn.valid_transitions().is_empty());
        assert!(!EntryStatus::Withdrawn.can_transition(EntryStatus::Entered));
    }

    #[test]
    fn scratched_to_absent_invalid() {
        assert!(!EntryStatus::Scratched.can_transition(EntryStatus::Absent));
    }

    #[test]
    fn absent_to_withdrawn_invalid() {
        assert!(!EntryStatus::Absent.can_transition(EntryStatus::Withdrawn));
    }

    #[test]
    fn validate_transition_err_names_both_states() {
        let err = EntryStatus::Withdrawn
            .validate_transition(EntryStatus::Entered)
            .unwrap_err();
        assert!(err.to_string().contains("withdrawn"));
        assert!(err.to_string().contains("entered"));
    }

    // -----------------------------------------------------------------------
    // Display and counting effects
    // -----------------------------------------------------------------------

    #[test]
    fn scratched_displays_marker_instead_of_position() {
        assert_eq!(EntryStatus::Scratched.position_marker(3), "X");
    }

    #[test]
    fn other_statuses_display_numeric_position() {
        assert_eq!(EntryStatus::Entered.position_marker(3), "3");
        assert_eq!(EntryStatus::Absent.position_marker(7), "7");
        assert_eq!(EntryStatus::Withdrawn.position_marker(1), "1");
    }

    #[test]
    fn withdrawn_excluded_from_active_counts() {
        assert!(EntryStatus::Entered.counts_toward_active());
        assert!(EntryStatus::Scratched.counts_toward_active());
        assert!(EntryStatus::Absent.counts_toward_active());
        assert!(!EntryStatus::Withdrawn.counts_toward_active());
    }

    // -----------------------------------------------------------------------
    // String round-trips
    // -----------------------------------------------------------------------

    #[test]
    fn status_string_round_trip() {
        for s in VALID_ENTRY_STATUSES {
            let parsed = EntryStatus::from_str_value(s).unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
    }

    #[test]
    fn invalid_status_rejected() {
        assert_matches!(
            EntryStatus::from_str_value("retired"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn entry_type_round_trip() {
        assert_eq!(EntryType::from_str_value("feo").unwrap(), EntryType::Feo);
        assert_eq!(EntryType::Regular.as_str(), "regular");
        assert!(EntryType::from_str_value("guest").is_err());
    }
}
