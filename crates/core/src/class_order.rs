//! Canonical class ordering and day/class/round grouping.
//!
//! The blueprint list fixes the order competition categories appear in,
//! for both the interactive class selector and the printable running
//! order. Both consumers must sort through [`ClassSortKey`]; a second
//! comparator would be an invariant violation.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entry_status::{EntryStatus, EntryType};
use crate::scoring::Discipline;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Blueprint ordering
// ---------------------------------------------------------------------------

/// Fixed category priority list. Classes render in this order.
pub const BLUEPRINT: &[&str] = &[
    "Patrol",
    "Detective",
    "Investigator",
    "Super Sleuth",
    "Private Investigator",
    "Detective Diversions",
    "Ranger",
    "Dasher",
    "Obedience",
    "Starter",
    "Advanced",
    "Pro",
    "ARF",
    "Zoom",
    "Games",
];

/// Sentinel rank for class names matching no blueprint entry; sorts after
/// every matched class.
pub const UNRANKED: usize = usize::MAX;

/// Trailing level/round suffixes: `"Ranger 3"`, `"Games 1 Rnd 2"`,
/// `"Zoom Round 1"` all reduce to their category name.
static TRAILING_ROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\s+(rnd|round)\.?\s*\d+|\s+\d+)+\s*$").expect("valid regex")
});

/// Strip trailing round/number suffixes from a class name.
pub fn base_class_name(name: &str) -> String {
    TRAILING_ROUND_RE.replace(name.trim(), "").trim().to_string()
}

/// Blueprint rank of a class name.
///
/// The stripped name is matched case-insensitively against the blueprint
/// by substring containment in either direction; the first matching entry
/// in list order wins (so "Private Investigator" ranks as "Investigator").
/// Unmatched names get [`UNRANKED`].
pub fn blueprint_rank(class_name: &str) -> usize {
    let base = base_class_name(class_name).to_lowercase();
    if base.is_empty() {
        return UNRANKED;
    }
    for (index, category) in BLUEPRINT.iter().enumerate() {
        let category = category.to_lowercase();
        if base.contains(&category) || category.contains(&base) {
            return index;
        }
    }
    UNRANKED
}

/// Sort key for a (class, round) pair: blueprint rank, then round number,
/// then discovery order for stability.
///
/// Field order matters: the derived `Ord` compares in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClassSortKey {
    pub rank: usize,
    pub round_number: i32,
    pub discovery_index: usize,
}

impl ClassSortKey {
    pub fn new(class_name: &str, round_number: i32, discovery_index: usize) -> Self {
        Self {
            rank: blueprint_rank(class_name),
            round_number,
            discovery_index,
        }
    }
}

// ---------------------------------------------------------------------------
// Denormalized roster rows
// ---------------------------------------------------------------------------

/// One selection joined through entry, round, class, and day. The shape
/// the grouping, grid, and export functions consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
    pub selection_id: DbId,
    pub handler_name: String,
    pub dog_name: String,
    pub entry_type: EntryType,
    pub entry_status: EntryStatus,
    pub running_position: i32,
    pub round_id: DbId,
    pub round_number: i32,
    pub judge_name: Option<String>,
    pub discipline: Discipline,
    pub games_subclass: Option<String>,
    pub class_id: DbId,
    pub class_name: String,
    pub class_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Grouped schedule tree
// ---------------------------------------------------------------------------

/// One round's ordered start list.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSchedule {
    pub round_id: DbId,
    pub round_number: i32,
    pub judge_name: Option<String>,
    pub discipline: Discipline,
    pub games_subclass: Option<String>,
    pub selections: Vec<RosterRow>,
}

impl RoundSchedule {
    /// Entries counting toward capacity; withdrawn rows stay in the list
    /// but are excluded here.
    pub fn active_count(&self) -> usize {
        self.selections
            .iter()
            .filter(|s| s.entry_status.counts_toward_active())
            .count()
    }
}

/// One class and its rounds, in round-number order.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSchedule {
    pub class_id: DbId,
    pub class_name: String,
    pub rounds: Vec<RoundSchedule>,
}

/// One day of the trial; `date` is `None` for the synthetic bucket that
/// collects rows without a resolvable date.
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub date: Option<NaiveDate>,
    pub classes: Vec<ClassSchedule>,
}

/// Group raw roster rows into the Day -> Class -> Round tree.
///
/// Days sort by date ascending with the undated bucket last. Classes
/// within a day follow the blueprint comparator, rounds sort by round
/// number, and selections sort by running position.
pub fn group_rows(rows: &[RosterRow]) -> Vec<DaySchedule> {
    // Discovery-ordered day buckets.
    let mut day_keys: Vec<Option<NaiveDate>> = Vec::new();
    for row in rows {
        if !day_keys.contains(&row.class_date) {
            day_keys.push(row.class_date);
        }
    }
    day_keys.sort_by_key(|d| match d {
        Some(date) => (0, *date),
        None => (1, NaiveDate::MAX),
    });

    day_keys
        .into_iter()
        .map(|date| DaySchedule {
            date,
            classes: group_day_classes(
                rows.iter().filter(|r| r.class_date == date).cloned().collect(),
            ),
        })
        .collect()
}

/// Group one day's rows into canonically ordered classes.
pub fn group_day_classes(rows: Vec<RosterRow>) -> Vec<ClassSchedule> {
    // Classes in discovery order first, so equal blueprint ranks stay stable.
    let mut class_ids: Vec<DbId> = Vec::new();
    for row in &rows {
        if !class_ids.contains(&row.class_id) {
            class_ids.push(row.class_id);
        }
    }

    let mut classes: Vec<(ClassSortKey, ClassSchedule)> = class_ids
        .into_iter()
        .enumerate()
        .map(|(discovery_index, class_id)| {
            let class_rows: Vec<&RosterRow> =
                rows.iter().filter(|r| r.class_id == class_id).collect();
            let class_name = class_rows[0].class_name.clone();

            let mut round_ids: Vec<DbId> = Vec::new();
            for row in &class_rows {
                if !round_ids.contains(&row.round_id) {
                    round_ids.push(row.round_id);
                }
            }

            let mut rounds: Vec<RoundSchedule> = round_ids
                .into_iter()
                .map(|round_id| {
                    let mut selections: Vec<RosterRow> = class_rows
                        .iter()
                        .filter(|r| r.round_id == round_id)
                        .map(|r| (*r).clone())
                        .collect();
                    selections.sort_by_key(|s| s.running_position);
                    let first = &selections[0];
                    RoundSchedule {
                        round_id,
                        round_number: first.round_number,
                        judge_name: first.judge_name.clone(),
                        discipline: first.discipline,
                        games_subclass: first.games_subclass.clone(),
                        selections,
                    }
                })
                .collect();
            rounds.sort_by_key(|r| r.round_number);

            let min_round = rounds.first().map(|r| r.round_number).unwrap_or(1);
            let key = ClassSortKey::new(&class_name, min_round, discovery_index);
            (
                key,
                ClassSchedule {
                    class_id,
                    class_name,
                    rounds,
                },
            )
        })
        .collect();

    classes.sort_by_key(|(key, _)| *key);
    classes.into_iter().map(|(_, class)| class).collect()
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(
        selection_id: DbId,
        class_id: DbId,
        class_name: &str,
        round_id: DbId,
        round_number: i32,
        running_position: i32,
        class_date: Option<NaiveDate>,
    ) -> RosterRow {
        RosterRow {
            selection_id,
            handler_name: format!("Handler {selection_id}"),
            dog_name: format!("Dog {selection_id}"),
            entry_type: EntryType::Regular,
            entry_status: EntryStatus::Entered,
            running_position,
            round_id,
            round_number,
            judge_name: Some("J. Wells".to_string()),
            discipline: Discipline::Scent,
            games_subclass: None,
            class_id,
            class_name: class_name.to_string(),
            class_date,
            created_at: Utc::now(),
        }
    }

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 6, d)
    }

    // -----------------------------------------------------------------------
    // Suffix stripping
    // -----------------------------------------------------------------------

    #[test]
    fn strips_trailing_round_suffixes() {
        assert_eq!(base_class_name("Games 1 Rnd 1"), "Games");
        assert_eq!(base_class_name("Ranger 3"), "Ranger");
        assert_eq!(base_class_name("Zoom Round 2"), "Zoom");
        assert_eq!(base_class_name("Super Sleuth 2 Rnd 10"), "Super Sleuth");
        assert_eq!(base_class_name("Patrol"), "Patrol");
    }

    #[test]
    fn strip_is_case_insensitive_and_trims() {
        assert_eq!(base_class_name("  Dasher RND 4  "), "Dasher");
    }

    // -----------------------------------------------------------------------
    // Blueprint rank
    // -----------------------------------------------------------------------

    #[test]
    fn rank_follows_list_order() {
        assert!(blueprint_rank("Patrol 1") < blueprint_rank("Detective 1"));
        assert!(blueprint_rank("Ranger 3 Rnd 1") < blueprint_rank("Games 1 Rnd 1"));
    }

    #[test]
    fn first_matching_entry_wins_for_multi_match_names() {
        // "Private Investigator" contains "Investigator", which appears
        // earlier in the list than the exact "Private Investigator" entry.
        assert_eq!(
            blueprint_rank("Private Investigator 2"),
            blueprint_rank("Investigator 1")
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(blueprint_rank("ARF 1"), blueprint_rank("arf 2"));
    }

    #[test]
    fn unmatched_class_sorts_after_all_matched() {
        assert_eq!(blueprint_rank("Barn Hunt 1"), UNRANKED);
        assert!(blueprint_rank("Games 9") < blueprint_rank("Barn Hunt 1"));
    }

    #[test]
    fn key_breaks_ties_by_round_then_discovery() {
        let a = ClassSortKey::new("Ranger 1", 1, 5);
        let b = ClassSortKey::new("Ranger 2", 2, 0);
        let c = ClassSortKey::new("Ranger 3", 2, 1);
        assert!(a < b);
        assert!(b < c);
    }

    // -----------------------------------------------------------------------
    // Grouping
    // -----------------------------------------------------------------------

    #[test]
    fn canonical_order_ranger_before_games() {
        let rows = vec![
            row(1, 100, "Games 1 Rnd 1", 1000, 1, 1, date(6)),
            row(2, 200, "Ranger 3 Rnd 1", 2000, 1, 1, date(6)),
        ];
        let days = group_rows(&rows);
        assert_eq!(days.len(), 1);
        let names: Vec<&str> = days[0].classes.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(names, vec!["Ranger 3 Rnd 1", "Games 1 Rnd 1"]);
    }

    #[test]
    fn rows_group_by_day_with_undated_bucket_last() {
        let rows = vec![
            row(1, 100, "Patrol 1", 1000, 1, 1, date(7)),
            row(2, 200, "Patrol 1", 2000, 1, 1, date(6)),
            row(3, 300, "Patrol 1", 3000, 1, 1, None),
        ];
        let days = group_rows(&rows);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, date(6));
        assert_eq!(days[1].date, date(7));
        assert_eq!(days[2].date, None);
    }

    #[test]
    fn rounds_sort_ascending_within_class() {
        let rows = vec![
            row(1, 100, "Detective 1", 1002, 2, 1, date(6)),
            row(2, 100, "Detective 1", 1001, 1, 1, date(6)),
        ];
        let days = group_rows(&rows);
        let rounds = &days[0].classes[0].rounds;
        assert_eq!(rounds[0].round_number, 1);
        assert_eq!(rounds[1].round_number, 2);
    }

    #[test]
    fn selections_sort_by_running_position() {
        let rows = vec![
            row(3, 100, "Patrol 1", 1000, 1, 3, date(6)),
            row(1, 100, "Patrol 1", 1000, 1, 1, date(6)),
            row(2, 100, "Patrol 1", 1000, 1, 2, date(6)),
        ];
        let days = group_rows(&rows);
        let selections = &days[0].classes[0].rounds[0].selections;
        let order: Vec<DbId> = selections.iter().map(|s| s.selection_id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn unmatched_classes_keep_discovery_order() {
        let rows = vec![
            row(1, 100, "Barn Hunt 1", 1000, 1, 1, date(6)),
            row(2, 200, "Lure Course 1", 2000, 1, 1, date(6)),
        ];
        let days = group_rows(&rows);
        let names: Vec<&str> = days[0].classes.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(names, vec!["Barn Hunt 1", "Lure Course 1"]);
    }

    #[test]
    fn active_count_excludes_withdrawn() {
        let mut rows = vec![
            row(1, 100, "Patrol 1", 1000, 1, 1, date(6)),
            row(2, 100, "Patrol 1", 1000, 1, 2, date(6)),
            row(3, 100, "Patrol 1", 1000, 1, 3, date(6)),
        ];
        rows[1].entry_status = EntryStatus::Withdrawn;
        rows[2].entry_status = EntryStatus::Scratched;
        let days = group_rows(&rows);
        let round = &days[0].classes[0].rounds[0];
        assert_eq!(round.selections.len(), 3);
        assert_eq!(round.active_count(), 2);
    }
}
