//! Route definitions for classes and their nested sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{round, score, trial_class};
use crate::state::AppState;

/// Routes mounted at `/classes`.
///
/// ```text
/// GET    /{class_id}                  get_by_id
/// GET    /{class_id}/rounds           list_by_class
/// POST   /{class_id}/rounds           create
/// POST   /{class_id}/scores/save      batch save (per-record report)
/// GET    /{class_id}/scores/export    CSV attachment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{class_id}", get(trial_class::get_by_id))
        .route(
            "/{class_id}/rounds",
            get(round::list_by_class).post(round::create),
        )
        .route("/{class_id}/scores/save", post(score::save_all))
        .route("/{class_id}/scores/export", get(score::export_csv))
}
