//! Route definitions for trials and their nested sub-resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{day, entry, running_order, trial};
use crate::state::AppState;

/// Routes mounted at `/trials`.
///
/// ```text
/// GET    /                        list
/// POST   /                        create
/// GET    /{trial_id}              get_by_id
/// GET    /{trial_id}/days         list_by_trial
/// POST   /{trial_id}/days         create
/// GET    /{trial_id}/entries      list_by_trial
/// POST   /{trial_id}/entries      create
/// GET    /{trial_id}/selections   trial_roster
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trial::list).post(trial::create))
        .route("/{trial_id}", get(trial::get_by_id))
        .route("/{trial_id}/days", get(day::list_by_trial).post(day::create))
        .route(
            "/{trial_id}/entries",
            get(entry::list_by_trial).post(entry::create),
        )
        .route("/{trial_id}/selections", get(running_order::trial_roster))
}
