//! Route definitions for the `/ticket-templates` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::ticket_templates as templates;
use crate::state::AppState;

/// Routes mounted at `/ticket-templates`.
///
/// ```text
/// GET    /        list_templates
/// POST   /        create_template
/// PUT    /{id}    update_template
/// DELETE /{id}    delete_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/{id}",
            put(templates::update_template).delete(templates::delete_template),
        )
}
