//! Route definitions.

pub mod day;
pub mod health;
pub mod round;
pub mod selection;
pub mod trial;
pub mod trial_class;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /trials                                  list, create
/// /trials/{trial_id}                       get
/// /trials/{trial_id}/days                  list, create
/// /trials/{trial_id}/entries               list, create
/// /trials/{trial_id}/selections            grouped roster (canonical order)
///
/// /days/{day_id}                           get
/// /days/{day_id}/classes                   list, create
/// /days/{day_id}/running-order             printable grid document
///
/// /classes/{class_id}                      get
/// /classes/{class_id}/rounds               list, create
/// /classes/{class_id}/scores/save          batch save
/// /classes/{class_id}/scores/export        CSV export
///
/// /rounds/{round_id}                       update (judge, subclass)
/// /rounds/{round_id}/selections            list, append
/// /rounds/{round_id}/selections/{id}/reorder  move within round
///
/// /selections/{id}                         patch status / entry type
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/trials", trial::router())
        .nest("/days", day::router())
        .nest("/classes", trial_class::router())
        .nest("/rounds", round::router())
        .nest("/selections", selection::router())
}
