pub mod bookings;
pub mod health;
pub mod ticket_templates;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tickets/{id}                       ticket info incl. PDF status
/// /tickets/{id}/pdf                   generate + stream the PDF
///
/// /bookings/{id}/tickets              list booking tickets
/// /bookings/{id}/tickets/pdf          generate PDFs for the booking (POST)
///
/// /ticket-templates                   list, create (organizer)
/// /ticket-templates/{id}              update, delete (organizer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tickets", tickets::router())
        .nest("/bookings", bookings::router())
        .nest("/ticket-templates", ticket_templates::router())
}
