use crate::types::DbId;

/// Domain-level error taxonomy shared across the workspace.
///
/// The API layer maps these onto HTTP responses; the PDF producer wraps
/// them where a ticket or booking row is missing.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
