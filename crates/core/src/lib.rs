//! Pure domain logic for the ringside trial-scoring backend.
//!
//! Everything in this crate is framework-independent and database-free:
//! running-order sequencing, the entry participation state machine,
//! discipline-specific score capture, canonical class ordering, and the
//! running-order grid / CSV generators. The `db` crate persists what these
//! modules compute; the `api` crate orchestrates the two.

pub mod class_order;
pub mod entry_status;
pub mod error;
pub mod recent;
pub mod running_order;
pub mod scoring;
pub mod sequencing;
pub mod types;
