//! Discipline-specific score capture and result derivation.
//!
//! Score edits are an in-memory merge only: a [`Scoresheet`] accumulates
//! per-selection drafts with no network involvement, and the whole sheet is
//! persisted in one explicit batch save. The batch is per-record: failures
//! are reported individually, already-issued writes are not rolled back,
//! and retries are caller-initiated.
//!
//! [`derive_result`] is the single source of truth for the displayed
//! result value. Both the print grid and the CSV export call it; they
//! cannot disagree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry_status::EntryStatus;
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Disciplines
// ---------------------------------------------------------------------------

pub const DISCIPLINE_SCENT: &str = "scent";
pub const DISCIPLINE_RALLY: &str = "rally";
pub const DISCIPLINE_GAMES: &str = "games";

/// All valid discipline values.
pub const VALID_DISCIPLINES: &[&str] =
    &[DISCIPLINE_SCENT, DISCIPLINE_RALLY, DISCIPLINE_GAMES];

/// Judging discipline of a round, driving which score fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Scent,
    Rally,
    Games,
}

impl Discipline {
    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scent => DISCIPLINE_SCENT,
            Self::Rally => DISCIPLINE_RALLY,
            Self::Games => DISCIPLINE_GAMES,
        }
    }

    /// Parse from the database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            DISCIPLINE_SCENT => Ok(Self::Scent),
            DISCIPLINE_RALLY => Ok(Self::Rally),
            DISCIPLINE_GAMES => Ok(Self::Games),
            _ => Err(CoreError::Validation(format!(
                "Invalid discipline '{s}'. Must be one of: {}",
                VALID_DISCIPLINES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// Pass/fail outcome for a single scent element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScentResult {
    Pass,
    Fail,
}

impl ScentResult {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            _ => Err(CoreError::Validation(format!(
                "Invalid scent result '{s}'. Must be 'pass' or 'fail'"
            ))),
        }
    }
}

/// Overall pass value for the shared `pass_fail` field.
pub const PASS: &str = "pass";

/// Overall fail value for the shared `pass_fail` field.
pub const FAIL: &str = "fail";

/// Score field names accepted by [`ScoreDraft::merge_field`].
pub const VALID_SCORE_FIELDS: &[&str] = &[
    "scent1",
    "scent2",
    "scent3",
    "scent4",
    "time_seconds",
    "numerical_score",
    "fault1",
    "pass_fail",
    "judge_notes",
    "entry_status",
];

// ---------------------------------------------------------------------------
// Score draft
// ---------------------------------------------------------------------------

/// In-memory score for one selection. All fields optional: a draft exists
/// from the first field edit and only populated drafts are persisted.
///
/// `entry_status` is a write-time snapshot of the selection's status,
/// independent of the selection's live status, so what was true at scoring
/// time can be reconstructed later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDraft {
    pub scent1: Option<ScentResult>,
    pub scent2: Option<ScentResult>,
    pub scent3: Option<ScentResult>,
    pub scent4: Option<ScentResult>,
    pub time_seconds: Option<f64>,
    pub numerical_score: Option<i32>,
    pub fault1: Option<i32>,
    pub pass_fail: Option<String>,
    pub judge_notes: Option<String>,
    pub entry_status: Option<EntryStatus>,
}

impl ScoreDraft {
    /// Merge a single field edit into the draft. Local only, no I/O.
    ///
    /// A JSON `null` clears the field; anything else must match the
    /// field's type.
    pub fn merge_field(&mut self, field: &str, value: Value) -> Result<(), CoreError> {
        match field {
            "scent1" => self.scent1 = parse_scent(field, value)?,
            "scent2" => self.scent2 = parse_scent(field, value)?,
            "scent3" => self.scent3 = parse_scent(field, value)?,
            "scent4" => self.scent4 = parse_scent(field, value)?,
            "time_seconds" => self.time_seconds = parse_time(value)?,
            "numerical_score" => self.numerical_score = parse_int(field, value)?,
            "fault1" => {
                let fault = parse_int(field, value)?;
                if let Some(f) = fault {
                    if f < 0 {
                        return Err(CoreError::Validation(format!(
                            "fault1 must be non-negative, got {f}"
                        )));
                    }
                }
                self.fault1 = fault;
            }
            "pass_fail" => self.pass_fail = parse_pass_fail(value)?,
            "judge_notes" => self.judge_notes = parse_string(field, value)?,
            "entry_status" => {
                self.entry_status = match value {
                    Value::Null => None,
                    Value::String(s) => Some(EntryStatus::from_str_value(&s)?),
                    other => {
                        return Err(CoreError::Validation(format!(
                            "entry_status must be a string, got {other}"
                        )))
                    }
                };
            }
            _ => {
                return Err(CoreError::Validation(format!(
                    "Unknown score field '{field}'. Must be one of: {}",
                    VALID_SCORE_FIELDS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Whether any score field has been populated.
    pub fn is_populated(&self) -> bool {
        self.scent1.is_some()
            || self.scent2.is_some()
            || self.scent3.is_some()
            || self.scent4.is_some()
            || self.time_seconds.is_some()
            || self.numerical_score.is_some()
            || self.fault1.is_some()
            || self.pass_fail.is_some()
            || self.judge_notes.is_some()
            || self.entry_status.is_some()
    }

    /// Validate the draft against its round's discipline.
    ///
    /// Fields from another discipline's set are rejected, and a
    /// subclass-coded `pass_fail` is only accepted on a games round whose
    /// subclass it matches.
    pub fn validate_for_round(
        &self,
        discipline: Discipline,
        games_subclass: Option<&str>,
    ) -> Result<(), CoreError> {
        let has_scent = self.scent1.is_some()
            || self.scent2.is_some()
            || self.scent3.is_some()
            || self.scent4.is_some();

        match discipline {
            Discipline::Scent => {
                if self.time_seconds.is_some()
                    || self.numerical_score.is_some()
                    || self.fault1.is_some()
                {
                    return Err(CoreError::Validation(
                        "Scent rounds accept only scent1-scent4 element results".to_string(),
                    ));
                }
            }
            Discipline::Rally => {
                if has_scent || self.fault1.is_some() {
                    return Err(CoreError::Validation(
                        "Rally rounds accept only time_seconds and numerical_score".to_string(),
                    ));
                }
            }
            Discipline::Games => {
                if has_scent || self.numerical_score.is_some() {
                    return Err(CoreError::Validation(
                        "Games rounds accept only time_seconds and fault1".to_string(),
                    ));
                }
            }
        }

        if let Some(pf) = self.pass_fail.as_deref() {
            let is_subclass_code = games_subclass
                .is_some_and(|code| pf.eq_ignore_ascii_case(code));
            let allowed = pf == PASS
                || pf == FAIL
                || (discipline == Discipline::Games && is_subclass_code);
            if !allowed {
                return Err(CoreError::Validation(format!(
                    "Invalid pass_fail value '{pf}' for a {} round",
                    discipline.as_str()
                )));
            }
        }

        Ok(())
    }

    /// Normalize stored values for a round: games times are kept to two
    /// decimal places.
    pub fn normalize_for_round(&mut self, discipline: Discipline) {
        if discipline == Discipline::Games {
            if let Some(t) = self.time_seconds {
                self.time_seconds = Some((t * 100.0).round() / 100.0);
            }
        }
    }
}

fn parse_scent(field: &str, value: Value) -> Result<Option<ScentResult>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(ScentResult::from_str_value(&s)?)),
        other => Err(CoreError::Validation(format!(
            "{field} must be 'pass', 'fail', or null, got {other}"
        ))),
    }
}

fn parse_time(value: Value) -> Result<Option<f64>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let t = n.as_f64().ok_or_else(|| {
                CoreError::Validation(format!("time_seconds is not a valid number: {n}"))
            })?;
            if t < 0.0 {
                return Err(CoreError::Validation(format!(
                    "time_seconds must be non-negative, got {t}"
                )));
            }
            Ok(Some(t))
        }
        other => Err(CoreError::Validation(format!(
            "time_seconds must be a number, got {other}"
        ))),
    }
}

fn parse_int(field: &str, value: Value) -> Result<Option<i32>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                CoreError::Validation(format!("{field} must be an integer, got {n}"))
            }),
        other => Err(CoreError::Validation(format!(
            "{field} must be an integer, got {other}"
        ))),
    }
}

fn parse_string(field: &str, value: Value) -> Result<Option<String>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(CoreError::Validation(format!(
            "{field} must be a string, got {other}"
        ))),
    }
}

fn parse_pass_fail(value: Value) -> Result<Option<String>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            if s.is_empty() {
                return Ok(None);
            }
            if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(CoreError::Validation(format!(
                    "Invalid pass_fail value '{s}'"
                )));
            }
            Ok(Some(s))
        }
        other => Err(CoreError::Validation(format!(
            "pass_fail must be a string, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Scoresheet
// ---------------------------------------------------------------------------

/// In-memory score drafts for one class, keyed by selection id.
///
/// A draft is created on the first field edit for a selection. Nothing
/// here touches the network; persistence happens only when the caller
/// takes [`Scoresheet::drafts_to_persist`] and issues the batch save.
#[derive(Debug, Default)]
pub struct Scoresheet {
    drafts: HashMap<DbId, ScoreDraft>,
}

impl Scoresheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single field edit, creating the draft if needed, and
    /// return the merged draft.
    pub fn record_field(
        &mut self,
        selection_id: DbId,
        field: &str,
        value: Value,
    ) -> Result<&ScoreDraft, CoreError> {
        let draft = self.drafts.entry(selection_id).or_default();
        draft.merge_field(field, value)?;
        Ok(&self.drafts[&selection_id])
    }

    /// The current draft for a selection, if any field was ever edited.
    pub fn draft(&self, selection_id: DbId) -> Option<&ScoreDraft> {
        self.drafts.get(&selection_id)
    }

    /// Drafts with at least one populated field, in selection-id order.
    ///
    /// This is the set a batch save persists; untouched or fully-cleared
    /// drafts are skipped.
    pub fn drafts_to_persist(&self) -> Vec<(DbId, ScoreDraft)> {
        let mut out: Vec<(DbId, ScoreDraft)> = self
            .drafts
            .iter()
            .filter(|(_, d)| d.is_populated())
            .map(|(&id, d)| (id, d.clone()))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Result derivation
// ---------------------------------------------------------------------------

/// Derive the displayed result value for a scored run.
///
/// A passing games run with a subclass on the round displays the subclass
/// code (uppercased); everything else displays the pass_fail value itself
/// (`Pass` / `Fail`, or an uppercased subclass code when pass_fail already
/// holds one), or blank when unset. The print grid and the CSV export both
/// go through this function.
pub fn derive_result(
    discipline: Discipline,
    games_subclass: Option<&str>,
    pass_fail: Option<&str>,
) -> String {
    let Some(pf) = pass_fail.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };

    if discipline == Discipline::Games && pf.eq_ignore_ascii_case(PASS) {
        if let Some(code) = games_subclass.map(str::trim).filter(|c| !c.is_empty()) {
            return code.to_uppercase();
        }
    }

    match pf {
        PASS => "Pass".to_string(),
        FAIL => "Fail".to_string(),
        other => other.to_uppercase(),
    }
}

// ---------------------------------------------------------------------------
// Batch save reporting
// ---------------------------------------------------------------------------

/// One failed record within a batch save.
#[derive(Debug, Clone, Serialize)]
pub struct SaveError {
    pub selection_id: DbId,
    pub message: String,
}

/// Per-record outcome of a batch save.
///
/// Writes already issued when a record fails are not rolled back; the
/// report carries every failure so the caller can retry selectively.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveReport {
    pub persisted: usize,
    pub errors: Vec<SaveError>,
}

impl SaveReport {
    pub fn record_ok(&mut self) {
        self.persisted += 1;
    }

    pub fn record_err(&mut self, selection_id: DbId, message: impl Into<String>) {
        self.errors.push(SaveError {
            selection_id,
            message: message.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A batch save requires the round's judge to be assigned first.
pub fn validate_judge_assigned(judge_name: Option<&str>) -> Result<(), CoreError> {
    match judge_name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(CoreError::Validation(
            "A judge must be assigned to the round before scores can be saved".to_string(),
        )),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    // -----------------------------------------------------------------------
    // Draft merge semantics
    // -----------------------------------------------------------------------

    #[test]
    fn first_field_edit_creates_draft() {
        let mut sheet = Scoresheet::new();
        assert!(sheet.draft(1).is_none());
        sheet.record_field(1, "pass_fail", json!("pass")).unwrap();
        assert_eq!(sheet.draft(1).unwrap().pass_fail.as_deref(), Some("pass"));
    }

    #[test]
    fn merge_accumulates_fields() {
        let mut sheet = Scoresheet::new();
        sheet.record_field(1, "scent1", json!("pass")).unwrap();
        sheet.record_field(1, "scent2", json!("fail")).unwrap();
        sheet.record_field(1, "judge_notes", json!("late start")).unwrap();
        let draft = sheet.draft(1).unwrap();
        assert_eq!(draft.scent1, Some(ScentResult::Pass));
        assert_eq!(draft.scent2, Some(ScentResult::Fail));
        assert_eq!(draft.judge_notes.as_deref(), Some("late start"));
    }

    #[test]
    fn null_clears_a_field() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("scent1", json!("pass")).unwrap();
        draft.merge_field("scent1", Value::Null).unwrap();
        assert!(draft.scent1.is_none());
    }

    #[test]
    fn unknown_field_rejected() {
        let mut draft = ScoreDraft::default();
        assert_matches!(
            draft.merge_field("scent5", json!("pass")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn negative_time_rejected() {
        let mut draft = ScoreDraft::default();
        assert!(draft.merge_field("time_seconds", json!(-1.0)).is_err());
        assert!(draft.merge_field("time_seconds", json!(0.0)).is_ok());
    }

    #[test]
    fn negative_fault_count_rejected() {
        let mut draft = ScoreDraft::default();
        assert!(draft.merge_field("fault1", json!(-2)).is_err());
        assert!(draft.merge_field("fault1", json!(0)).is_ok());
    }

    #[test]
    fn pass_fail_lowercased_on_merge() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("pass_fail", json!("GB")).unwrap();
        assert_eq!(draft.pass_fail.as_deref(), Some("gb"));
    }

    #[test]
    fn entry_status_snapshot_parsed() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("entry_status", json!("scratched")).unwrap();
        assert_eq!(draft.entry_status, Some(EntryStatus::Scratched));
        assert!(draft.merge_field("entry_status", json!("gone")).is_err());
    }

    #[test]
    fn only_populated_drafts_persist() {
        let mut sheet = Scoresheet::new();
        sheet.record_field(2, "pass_fail", json!("pass")).unwrap();
        // Draft 5 is created then fully cleared; it must not persist.
        sheet.record_field(5, "scent1", json!("fail")).unwrap();
        sheet.record_field(5, "scent1", Value::Null).unwrap();
        sheet.record_field(1, "fault1", json!(3)).unwrap();

        let to_persist = sheet.drafts_to_persist();
        let ids: Vec<DbId> = to_persist.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    // -----------------------------------------------------------------------
    // Discipline validation
    // -----------------------------------------------------------------------

    #[test]
    fn scent_round_rejects_timed_fields() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("time_seconds", json!(41.3)).unwrap();
        assert!(draft.validate_for_round(Discipline::Scent, None).is_err());
    }

    #[test]
    fn rally_round_accepts_time_and_score() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("time_seconds", json!(62.0)).unwrap();
        draft.merge_field("numerical_score", json!(198)).unwrap();
        assert!(draft.validate_for_round(Discipline::Rally, None).is_ok());
    }

    #[test]
    fn rally_round_rejects_scent_fields() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("scent1", json!("pass")).unwrap();
        assert!(draft.validate_for_round(Discipline::Rally, None).is_err());
    }

    #[test]
    fn games_round_rejects_numerical_score() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("numerical_score", json!(10)).unwrap();
        assert!(draft.validate_for_round(Discipline::Games, Some("GB")).is_err());
    }

    #[test]
    fn subclass_pass_fail_only_valid_on_matching_games_round() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("pass_fail", json!("gb")).unwrap();
        assert!(draft.validate_for_round(Discipline::Games, Some("GB")).is_ok());
        assert!(draft.validate_for_round(Discipline::Games, Some("BJ")).is_err());
        assert!(draft.validate_for_round(Discipline::Rally, None).is_err());
    }

    #[test]
    fn games_time_normalized_to_two_decimals() {
        let mut draft = ScoreDraft::default();
        draft.merge_field("time_seconds", json!(12.3456)).unwrap();
        draft.normalize_for_round(Discipline::Games);
        assert_eq!(draft.time_seconds, Some(12.35));
    }

    // -----------------------------------------------------------------------
    // Result derivation
    // -----------------------------------------------------------------------

    #[test]
    fn games_pass_with_subclass_derives_code() {
        let result = derive_result(Discipline::Games, Some("GB"), Some("pass"));
        assert_eq!(result, "GB");
    }

    #[test]
    fn games_fail_derives_fail() {
        // Scenario: games class, subclass BJ; a failing run still shows Fail.
        assert_eq!(derive_result(Discipline::Games, Some("BJ"), Some("pass")), "BJ");
        assert_eq!(derive_result(Discipline::Games, Some("BJ"), Some("fail")), "Fail");
    }

    #[test]
    fn games_pass_without_subclass_derives_pass() {
        assert_eq!(derive_result(Discipline::Games, None, Some("pass")), "Pass");
    }

    #[test]
    fn non_games_pass_ignores_subclass() {
        assert_eq!(derive_result(Discipline::Scent, Some("GB"), Some("pass")), "Pass");
    }

    #[test]
    fn unset_pass_fail_derives_blank() {
        assert_eq!(derive_result(Discipline::Rally, None, None), "");
        assert_eq!(derive_result(Discipline::Games, Some("GB"), Some("  ")), "");
    }

    #[test]
    fn stored_subclass_value_displays_uppercased() {
        // pass_fail may hold the lowercased subclass code itself.
        assert_eq!(derive_result(Discipline::Games, Some("GB"), Some("gb")), "GB");
    }

    // -----------------------------------------------------------------------
    // Batch save
    // -----------------------------------------------------------------------

    #[test]
    fn judge_must_be_assigned_before_save() {
        assert!(validate_judge_assigned(Some("M. Harris")).is_ok());
        assert!(validate_judge_assigned(Some("   ")).is_err());
        assert!(validate_judge_assigned(None).is_err());
    }

    #[test]
    fn one_failing_record_does_not_abort_the_others() {
        // Batch of three drafts; the middle record's persist fails. The
        // other two stay persisted and the failure is reported per record.
        let mut sheet = Scoresheet::new();
        sheet.record_field(1, "pass_fail", json!("pass")).unwrap();
        sheet.record_field(2, "pass_fail", json!("fail")).unwrap();
        sheet.record_field(3, "pass_fail", json!("pass")).unwrap();

        let mut report = SaveReport::default();
        for (selection_id, _draft) in sheet.drafts_to_persist() {
            if selection_id == 2 {
                report.record_err(selection_id, "connection reset");
            } else {
                report.record_ok();
            }
        }

        assert_eq!(report.persisted, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].selection_id, 2);
        assert!(!report.is_clean());
    }

    // -----------------------------------------------------------------------
    // String round-trips
    // -----------------------------------------------------------------------

    #[test]
    fn discipline_round_trip() {
        for s in VALID_DISCIPLINES {
            assert_eq!(Discipline::from_str_value(s).unwrap().as_str(), *s);
        }
        assert!(Discipline::from_str_value("agility").is_err());
    }
}
