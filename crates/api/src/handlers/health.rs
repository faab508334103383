//! Liveness/readiness handler.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/health
///
/// Probes database connectivity so load balancers see real readiness.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    ringside_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
