use crate::types::DbId;

/// Domain-level error type shared by all core modules.
///
/// Persistence failures are not represented here: repository calls return
/// `sqlx::Error`, which the API layer classifies separately.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
