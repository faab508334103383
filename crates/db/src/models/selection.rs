//! Selection entity model, DTOs, and the denormalized roster view.

use chrono::NaiveDate;
use ringside_core::class_order::RosterRow;
use ringside_core::entry_status::{EntryStatus, EntryType};
use ringside_core::error::CoreError;
use ringside_core::scoring::Discipline;
use ringside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `selections` table: one competitor's registration to one
/// round, holding its running position and participation status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Selection {
    pub id: DbId,
    pub entry_id: DbId,
    pub round_id: DbId,
    pub running_position: i32,
    pub entry_type: String,
    pub entry_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Selection {
    /// Parsed participation status.
    pub fn status(&self) -> Result<EntryStatus, CoreError> {
        EntryStatus::from_str_value(&self.entry_status)
    }
}

/// DTO for creating a new selection. The running position is assigned by
/// the append operation, not the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSelection {
    pub entry_id: DbId,
    /// Defaults to `regular` if omitted.
    pub entry_type: Option<String>,
}

/// DTO for updating a selection's status or entry type.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSelection {
    pub entry_status: Option<String>,
    pub entry_type: Option<String>,
}

/// A selection joined through entry, round, class, and day.
///
/// This is the denormalized shape the grouping, grid, and export logic
/// consume, fetched in one query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SelectionDetail {
    pub selection_id: DbId,
    pub handler_name: String,
    pub dog_name: String,
    pub entry_type: String,
    pub entry_status: String,
    pub running_position: i32,
    pub round_id: DbId,
    pub round_number: i32,
    pub judge_name: Option<String>,
    pub discipline: String,
    pub games_subclass: Option<String>,
    pub class_id: DbId,
    pub class_name: String,
    pub class_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

impl SelectionDetail {
    /// Convert into the core roster row, parsing the stored enums.
    pub fn into_roster_row(self) -> Result<RosterRow, CoreError> {
        Ok(RosterRow {
            selection_id: self.selection_id,
            handler_name: self.handler_name,
            dog_name: self.dog_name,
            entry_type: EntryType::from_str_value(&self.entry_type)?,
            entry_status: EntryStatus::from_str_value(&self.entry_status)?,
            running_position: self.running_position,
            round_id: self.round_id,
            round_number: self.round_number,
            judge_name: self.judge_name,
            discipline: Discipline::from_str_value(&self.discipline)?,
            games_subclass: self.games_subclass,
            class_id: self.class_id,
            class_name: self.class_name,
            class_date: self.class_date,
            created_at: self.created_at,
        })
    }
}
