//! Route definitions for the `/tickets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET /{id}        get_ticket
/// GET /{id}/pdf    download_ticket_pdf (?view=true for inline)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(tickets::get_ticket))
        .route("/{id}/pdf", get(tickets::download_ticket_pdf))
}
