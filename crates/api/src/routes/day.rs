//! Route definitions for days and their nested sub-resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{day, running_order, trial_class};
use crate::state::AppState;

/// Routes mounted at `/days`.
///
/// ```text
/// GET    /{day_id}                 get_by_id
/// GET    /{day_id}/classes         list_by_day
/// POST   /{day_id}/classes         create
/// GET    /{day_id}/running-order   printable grid document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{day_id}", get(day::get_by_id))
        .route(
            "/{day_id}/classes",
            get(trial_class::list_by_day).post(trial_class::create),
        )
        .route("/{day_id}/running-order", get(running_order::document))
}
