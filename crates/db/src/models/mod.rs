//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod day;
pub mod entry;
pub mod round;
pub mod score;
pub mod selection;
pub mod trial;
pub mod trial_class;
