//! Route definitions for direct selection access.

use axum::routing::patch;
use axum::Router;

use crate::handlers::selection;
use crate::state::AppState;

/// Routes mounted at `/selections`.
///
/// ```text
/// PATCH  /{id}   update status / entry type
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", patch(selection::update))
}
