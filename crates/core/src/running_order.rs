//! Running-order grid generation and score export.
//!
//! Both artifacts consume the same position-sequenced roster rows and the
//! same [`derive_result`] rule, so the printable grid and the CSV export
//! always agree on result values for identical input.

use serde::Serialize;

use crate::class_order::{ClassSortKey, RosterRow};
use crate::scoring::{derive_result, ScoreDraft};
use crate::types::DbId;

/// Trial metadata shown in the document header.
#[derive(Debug, Clone, Serialize)]
pub struct TrialInfo {
    pub trial_name: String,
    pub club_name: Option<String>,
}

/// A roster row paired with its score, when one exists.
#[derive(Debug, Clone)]
pub struct ScoredRow {
    pub roster: RosterRow,
    pub score: Option<ScoreDraft>,
}

impl ScoredRow {
    /// Displayed result for this run, via the shared derivation rule.
    pub fn result(&self) -> String {
        derive_result(
            self.roster.discipline,
            self.roster.games_subclass.as_deref(),
            self.score.as_ref().and_then(|s| s.pass_fail.as_deref()),
        )
    }
}

// ---------------------------------------------------------------------------
// Grid model
// ---------------------------------------------------------------------------

/// One filled cell of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    /// Numeric running position, or `"X"` for scratched entries.
    pub position_marker: String,
    /// `"{handler} - {dog}"`.
    pub text: String,
    /// Derived result, blank until scored.
    pub result: String,
}

/// One (class, round) column.
#[derive(Debug, Clone, Serialize)]
pub struct GridColumn {
    pub round_id: DbId,
    pub class_name: String,
    pub round_number: i32,
    pub judge_name: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub cells: Vec<GridCell>,
}

/// The full print grid: canonically ordered columns, tallest column
/// setting the row count.
#[derive(Debug, Clone, Serialize)]
pub struct RunningOrderGrid {
    pub columns: Vec<GridColumn>,
    pub height: usize,
}

/// Flatten one day's rows into (class, round) columns, ordered by the
/// blueprint comparator, with cells in running-position order.
pub fn build_grid(rows: &[ScoredRow]) -> RunningOrderGrid {
    let mut round_ids: Vec<DbId> = Vec::new();
    for row in rows {
        if !round_ids.contains(&row.roster.round_id) {
            round_ids.push(row.roster.round_id);
        }
    }

    let mut columns: Vec<(ClassSortKey, GridColumn)> = round_ids
        .into_iter()
        .enumerate()
        .map(|(discovery_index, round_id)| {
            let mut column_rows: Vec<&ScoredRow> = rows
                .iter()
                .filter(|r| r.roster.round_id == round_id)
                .collect();
            column_rows.sort_by_key(|r| r.roster.running_position);

            let first = &column_rows[0].roster;
            let key = ClassSortKey::new(&first.class_name, first.round_number, discovery_index);

            let cells = column_rows
                .iter()
                .map(|r| GridCell {
                    position_marker: r
                        .roster
                        .entry_status
                        .position_marker(r.roster.running_position),
                    text: format!("{} - {}", r.roster.handler_name, r.roster.dog_name),
                    result: r.result(),
                })
                .collect();

            (
                key,
                GridColumn {
                    round_id,
                    class_name: first.class_name.clone(),
                    round_number: first.round_number,
                    judge_name: first.judge_name.clone(),
                    date: first.class_date,
                    cells,
                },
            )
        })
        .collect();
    columns.sort_by_key(|(key, _)| *key);

    let columns: Vec<GridColumn> = columns.into_iter().map(|(_, c)| c).collect();
    let height = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);

    RunningOrderGrid { columns, height }
}

// ---------------------------------------------------------------------------
// Printable document
// ---------------------------------------------------------------------------

const CELL_STYLE: &str =
    "border: 1px solid #444; padding: 4px 8px; font-size: 12px; white-space: nowrap;";
const HEADER_STYLE: &str =
    "border: 1px solid #444; padding: 4px 8px; font-size: 12px; background: #eee; font-weight: bold;";

/// Render the grid as a self-contained printable HTML document.
///
/// Inline styling only; pagination is left to the print renderer.
pub fn render_document(trial: &TrialInfo, grid: &RunningOrderGrid) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} Running Order</title>\n</head>\n",
        escape_html(&trial.trial_name)
    ));
    html.push_str("<body style=\"font-family: Arial, Helvetica, sans-serif; margin: 16px;\">\n");
    html.push_str(&format!(
        "<h1 style=\"font-size: 18px;\">{} Running Order</h1>\n",
        escape_html(&trial.trial_name)
    ));
    if let Some(club) = trial.club_name.as_deref() {
        html.push_str(&format!(
            "<p style=\"font-size: 13px; margin-top: 0;\">{}</p>\n",
            escape_html(club)
        ));
    }

    html.push_str("<table style=\"border-collapse: collapse;\">\n");

    // Three header rows: date, judge, class/round.
    html.push_str("<tr>");
    for column in &grid.columns {
        let date = column
            .date
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_default();
        html.push_str(&format!("<th style=\"{HEADER_STYLE}\">{}</th>", escape_html(&date)));
    }
    html.push_str("</tr>\n<tr>");
    for column in &grid.columns {
        let judge = column.judge_name.as_deref().unwrap_or("");
        html.push_str(&format!("<th style=\"{HEADER_STYLE}\">{}</th>", escape_html(judge)));
    }
    html.push_str("</tr>\n<tr>");
    for column in &grid.columns {
        let label = format!("{} Rnd {}", column.class_name, column.round_number);
        html.push_str(&format!("<th style=\"{HEADER_STYLE}\">{}</th>", escape_html(&label)));
    }
    html.push_str("</tr>\n");

    // One row per position index; short columns render blank cells.
    for index in 0..grid.height {
        html.push_str("<tr>");
        for column in &grid.columns {
            match column.cells.get(index) {
                Some(cell) => {
                    let mut content = format!(
                        "{} {}",
                        escape_html(&cell.position_marker),
                        escape_html(&cell.text)
                    );
                    if !cell.result.is_empty() {
                        content.push_str(&format!(" ({})", escape_html(&cell.result)));
                    }
                    html.push_str(&format!("<td style=\"{CELL_STYLE}\">{content}</td>"));
                }
                None => html.push_str(&format!("<td style=\"{CELL_STYLE}\"></td>")),
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Fixed CSV column layout. Preserved verbatim; external consumers parse it.
pub const CSV_HEADER: &str = "position,handler,dog,entry_type,result,pass_fail,score,status";

/// Export one class's scored rows as CSV text.
///
/// Rows are ordered by round number then running position. Result values
/// come from the same derivation rule as the print grid.
pub fn export_scores_csv(rows: &[ScoredRow]) -> String {
    let mut sorted: Vec<&ScoredRow> = rows.iter().collect();
    sorted.sort_by_key(|r| (r.roster.round_number, r.roster.running_position));

    let mut lines = Vec::with_capacity(sorted.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for row in sorted {
        let roster = &row.roster;
        let pass_fail = row
            .score
            .as_ref()
            .and_then(|s| s.pass_fail.clone())
            .unwrap_or_default();
        let score_value = row
            .score
            .as_ref()
            .and_then(|s| {
                s.numerical_score
                    .map(|n| n.to_string())
                    .or_else(|| s.time_seconds.map(|t| format!("{t:.2}")))
            })
            .unwrap_or_default();

        let fields = [
            roster.entry_status.position_marker(roster.running_position),
            roster.handler_name.clone(),
            roster.dog_name.clone(),
            roster.entry_type.as_str().to_string(),
            row.result(),
            pass_fail,
            score_value,
            roster.entry_status.as_str().to_string(),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
        lines.push(line.join(","));
    }

    lines.join("\n")
}

/// Escape a CSV value: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::entry_status::{EntryStatus, EntryType};
    use crate::scoring::Discipline;

    fn roster_row(
        selection_id: DbId,
        handler: &str,
        dog: &str,
        position: i32,
        round_id: DbId,
        class_name: &str,
    ) -> RosterRow {
        RosterRow {
            selection_id,
            handler_name: handler.to_string(),
            dog_name: dog.to_string(),
            entry_type: EntryType::Regular,
            entry_status: EntryStatus::Entered,
            running_position: position,
            round_id,
            round_number: 1,
            judge_name: Some("M. Harris".to_string()),
            discipline: Discipline::Scent,
            games_subclass: None,
            class_id: round_id,
            class_name: class_name.to_string(),
            class_date: NaiveDate::from_ymd_opt(2026, 6, 6),
            created_at: Utc::now(),
        }
    }

    fn unscored(roster: RosterRow) -> ScoredRow {
        ScoredRow { roster, score: None }
    }

    fn games_row(selection_id: DbId, position: i32, subclass: &str, pass_fail: &str) -> ScoredRow {
        let mut roster = roster_row(selection_id, "Jo Park", "Biscuit", position, 900, "Games 1 Rnd 1");
        roster.discipline = Discipline::Games;
        roster.games_subclass = Some(subclass.to_string());
        let score = ScoreDraft {
            pass_fail: Some(pass_fail.to_string()),
            ..ScoreDraft::default()
        };
        ScoredRow {
            roster,
            score: Some(score),
        }
    }

    // -----------------------------------------------------------------------
    // Grid shape
    // -----------------------------------------------------------------------

    #[test]
    fn grid_height_is_max_column_length() {
        let rows = vec![
            unscored(roster_row(1, "Alice", "Ash", 1, 10, "Patrol 1")),
            unscored(roster_row(2, "Bob", "Birch", 2, 10, "Patrol 1")),
            unscored(roster_row(3, "Carol", "Cedar", 1, 20, "Ranger 1")),
        ];
        let grid = build_grid(&rows);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.columns.len(), 2);
    }

    #[test]
    fn grid_columns_follow_blueprint_order() {
        let rows = vec![
            unscored(roster_row(1, "Alice", "Ash", 1, 10, "Games 1 Rnd 1")),
            unscored(roster_row(2, "Bob", "Birch", 1, 20, "Ranger 3 Rnd 1")),
        ];
        let grid = build_grid(&rows);
        assert_eq!(grid.columns[0].class_name, "Ranger 3 Rnd 1");
        assert_eq!(grid.columns[1].class_name, "Games 1 Rnd 1");
    }

    #[test]
    fn cells_are_in_running_position_order() {
        let rows = vec![
            unscored(roster_row(2, "Bob", "Birch", 2, 10, "Patrol 1")),
            unscored(roster_row(1, "Alice", "Ash", 1, 10, "Patrol 1")),
        ];
        let grid = build_grid(&rows);
        assert_eq!(grid.columns[0].cells[0].text, "Alice - Ash");
        assert_eq!(grid.columns[0].cells[1].text, "Bob - Birch");
    }

    #[test]
    fn scratched_cell_keeps_slot_with_marker() {
        // Scenario: [Carol#1, Alice#2, Bob#3], Bob scratched. The order is
        // unchanged and Bob's marker renders as X.
        let mut bob = roster_row(3, "Bob", "Birch", 3, 10, "Patrol 1");
        bob.entry_status = EntryStatus::Scratched;
        let rows = vec![
            unscored(roster_row(1, "Carol", "Cedar", 1, 10, "Patrol 1")),
            unscored(roster_row(2, "Alice", "Ash", 2, 10, "Patrol 1")),
            unscored(bob),
        ];
        let grid = build_grid(&rows);
        let cells = &grid.columns[0].cells;
        assert_eq!(cells[0].position_marker, "1");
        assert_eq!(cells[1].position_marker, "2");
        assert_eq!(cells[2].position_marker, "X");
        assert_eq!(cells[2].text, "Bob - Birch");
    }

    // -----------------------------------------------------------------------
    // Document rendering
    // -----------------------------------------------------------------------

    #[test]
    fn document_has_three_header_rows_and_blank_padding() {
        let rows = vec![
            unscored(roster_row(1, "Alice", "Ash", 1, 10, "Patrol 1")),
            unscored(roster_row(2, "Bob", "Birch", 2, 10, "Patrol 1")),
            unscored(roster_row(3, "Carol", "Cedar", 1, 20, "Ranger 1")),
        ];
        let grid = build_grid(&rows);
        let trial = TrialInfo {
            trial_name: "June Trial".to_string(),
            club_name: Some("Valley Dog Sports".to_string()),
        };
        let html = render_document(&trial, &grid);

        assert!(html.contains("06 Jun 2026"));
        assert!(html.contains("M. Harris"));
        assert!(html.contains("Patrol 1 Rnd 1"));
        assert!(html.contains("Ranger 1 Rnd 1"));
        assert!(html.contains("1 Alice - Ash"));
        // The Ranger column is one short; the second body row pads it blank.
        assert!(html.contains("></td>"));
        // Self-contained: no external assets.
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn document_escapes_html_in_names() {
        let rows = vec![unscored(roster_row(1, "A & B", "Ash<>", 1, 10, "Patrol 1"))];
        let grid = build_grid(&rows);
        let trial = TrialInfo {
            trial_name: "Trial".to_string(),
            club_name: None,
        };
        let html = render_document(&trial, &grid);
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("Ash&lt;&gt;"));
    }

    // -----------------------------------------------------------------------
    // CSV export
    // -----------------------------------------------------------------------

    #[test]
    fn csv_header_is_fixed() {
        let csv = export_scores_csv(&[]);
        assert_eq!(csv, "position,handler,dog,entry_type,result,pass_fail,score,status");
    }

    #[test]
    fn games_subclass_results_in_csv() {
        // Games class, subclass BJ: a passing run exports the code, a
        // failing run exports Fail.
        let rows = vec![games_row(1, 1, "BJ", "pass"), games_row(2, 2, "BJ", "fail")];
        let csv = export_scores_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "1,Jo Park,Biscuit,regular,BJ,pass,,entered");
        assert_eq!(lines[2], "2,Jo Park,Biscuit,regular,Fail,fail,,entered");
    }

    #[test]
    fn csv_and_grid_agree_on_derived_result() {
        let rows = vec![games_row(1, 1, "GB", "pass")];
        let grid = build_grid(&rows);
        let csv = export_scores_csv(&rows);

        let grid_result = &grid.columns[0].cells[0].result;
        let csv_result = csv.lines().nth(1).unwrap().split(',').nth(4).unwrap();
        assert_eq!(grid_result, "GB");
        assert_eq!(csv_result, "GB");
    }

    #[test]
    fn scratched_entry_exports_marker_position() {
        let mut row = unscored(roster_row(1, "Alice", "Ash", 2, 10, "Patrol 1"));
        row.roster.entry_status = EntryStatus::Scratched;
        let csv = export_scores_csv(&[row]);
        assert!(csv.lines().nth(1).unwrap().starts_with("X,Alice,Ash"));
    }

    #[test]
    fn csv_escapes_embedded_commas_and_quotes() {
        let row = unscored(roster_row(1, "Park, Jo", "Bis\"cuit", 1, 10, "Patrol 1"));
        let csv = export_scores_csv(&[row]);
        let line = csv.lines().nth(1).unwrap();
        assert!(line.contains("\"Park, Jo\""));
        assert!(line.contains("\"Bis\"\"cuit\""));
    }

    #[test]
    fn csv_rows_ordered_by_round_then_position() {
        let mut r2 = roster_row(3, "Cara", "Cedar", 1, 11, "Patrol 1");
        r2.round_number = 2;
        let rows = vec![
            unscored(r2),
            unscored(roster_row(2, "Bob", "Birch", 2, 10, "Patrol 1")),
            unscored(roster_row(1, "Alice", "Ash", 1, 10, "Patrol 1")),
        ];
        let csv = export_scores_csv(&rows);
        let handlers: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(handlers, vec!["Alice", "Bob", "Cara"]);
    }

    #[test]
    fn rally_score_column_prefers_numerical_score() {
        let mut roster = roster_row(1, "Alice", "Ash", 1, 10, "Starter 1");
        roster.discipline = Discipline::Rally;
        let score = ScoreDraft {
            time_seconds: Some(61.5),
            numerical_score: Some(198),
            pass_fail: Some("pass".to_string()),
            ..ScoreDraft::default()
        };
        let csv = export_scores_csv(&[ScoredRow { roster, score: Some(score) }]);
        let line = csv.lines().nth(1).unwrap();
        assert!(line.contains(",198,"));
        assert!(line.contains(",Pass,"));
    }
}
