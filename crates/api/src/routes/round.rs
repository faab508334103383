//! Route definitions for rounds and their nested selections.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{round, selection};
use crate::state::AppState;

/// Routes mounted at `/rounds`.
///
/// ```text
/// PUT    /{round_id}                           update (judge, subclass)
/// GET    /{round_id}/selections                list_by_round
/// POST   /{round_id}/selections                append
/// POST   /{round_id}/selections/{id}/reorder   reorder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{round_id}", put(round::update))
        .route(
            "/{round_id}/selections",
            get(selection::list_by_round).post(selection::append),
        )
        .route(
            "/{round_id}/selections/{id}/reorder",
            post(selection::reorder),
        )
}
