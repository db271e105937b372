//! Route definitions for booking-scoped ticket operations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET  /{id}/tickets       list_booking_tickets
/// POST /{id}/tickets/pdf   generate_booking_pdfs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/tickets", get(tickets::list_booking_tickets))
        .route("/{id}/tickets/pdf", post(tickets::generate_booking_pdfs))
}
