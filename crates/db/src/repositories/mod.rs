//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod class_repo;
pub mod day_repo;
pub mod entry_repo;
pub mod round_repo;
pub mod score_repo;
pub mod selection_repo;
pub mod trial_repo;

pub use class_repo::ClassRepo;
pub use day_repo::DayRepo;
pub use entry_repo::EntryRepo;
pub use round_repo::RoundRepo;
pub use score_repo::ScoreRepo;
pub use selection_repo::SelectionRepo;
pub use trial_repo::TrialRepo;
