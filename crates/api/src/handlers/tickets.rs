//! Handlers for tickets and booking-scoped ticket operations.
//!
//! All endpoints require authentication via [`AuthUser`]. Access is
//! granted to the booking owner, the event organizer, or an admin.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use beout_core::error::CoreError;
use beout_core::roles::ROLE_ADMIN;
use beout_core::types::DbId;
use beout_db::models::booking::BookingDetail;
use beout_db::models::ticket::TicketDetail;
use beout_db::repositories::{BookingRepo, TicketRepo};
use beout_pdf::BookingPdfOutcome;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Owner / organizer / admin check shared by every ticket endpoint.
fn authorize(auth: &AuthUser, owner_id: DbId, organizer_id: DbId, action: &str) -> AppResult<()> {
    let allowed =
        auth.user_id == owner_id || auth.user_id == organizer_id || auth.role == ROLE_ADMIN;
    if allowed {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Cannot {action} another user's ticket"
        ))))
    }
}

/// Fetch a ticket with display fields, mapping a missing row to 404.
async fn find_ticket(pool: &sqlx::PgPool, ticket_id: DbId) -> AppResult<TicketDetail> {
    TicketRepo::find_detail(pool, ticket_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        }))
}

/// Fetch a booking with display fields, mapping a missing row to 404.
async fn find_booking(pool: &sqlx::PgPool, booking_id: DbId) -> AppResult<BookingDetail> {
    BookingRepo::find_detail(pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))
}

// ---------------------------------------------------------------------------
// Ticket info
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets/{id}
///
/// Ticket information including PDF generation status.
pub async fn get_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketDetail>>> {
    let ticket = find_ticket(&state.pool, ticket_id).await?;
    authorize(&auth, ticket.user_id, ticket.organizer_id, "view")?;

    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// PDF download
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    /// `true` streams the PDF inline for in-browser viewing.
    #[serde(default)]
    pub view: bool,
}

/// GET /api/v1/tickets/{id}/pdf?view=true|false
///
/// Stream the ticket's PDF, generating it first when no artifact exists
/// or the recorded file is gone from disk.
pub async fn download_ticket_pdf(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Query(params): Query<PdfQuery>,
) -> AppResult<Response> {
    let ticket = find_ticket(&state.pool, ticket_id).await?;
    authorize(&auth, ticket.user_id, ticket.organizer_id, "download")?;

    let existing_path = ticket.pdf_file_url.as_deref().and_then(|url| {
        url.rsplit('/')
            .next()
            .map(|name| state.config.upload_dir.join("tickets").join(name))
    });

    let pdf_path = match existing_path {
        Some(path) if tokio::fs::metadata(&path).await.is_ok() => path,
        _ => {
            tracing::info!(ticket_id, "No usable PDF artifact, generating");
            state.pdf_service.generate_ticket_pdf(ticket_id).await?.pdf_path
        }
    };

    let bytes = tokio::fs::read(&pdf_path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read PDF artifact: {e}")))?;

    let disposition_kind = if params.view { "inline" } else { "attachment" };
    let disposition = format!(
        "{disposition_kind}; filename=\"ticket-{}.pdf\"",
        ticket.ticket_number
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Booking-scoped operations
// ---------------------------------------------------------------------------

/// Payload for the booking ticket listing.
#[derive(Debug, Serialize)]
pub struct BookingTickets {
    pub booking: BookingDetail,
    pub tickets: Vec<TicketDetail>,
}

/// GET /api/v1/bookings/{id}/tickets
///
/// All tickets of a booking in ascending ticket-number order.
pub async fn list_booking_tickets(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<DataResponse<BookingTickets>>> {
    let booking = find_booking(&state.pool, booking_id).await?;
    authorize(&auth, booking.user_id, booking.organizer_id, "view")?;

    let tickets = TicketRepo::list_for_booking(&state.pool, booking_id).await?;

    Ok(Json(DataResponse {
        data: BookingTickets { booking, tickets },
    }))
}

/// POST /api/v1/bookings/{id}/tickets/pdf
///
/// Generate PDFs for every ticket in the booking. Per-ticket failures
/// are itemized in the result rather than failing the request.
pub async fn generate_booking_pdfs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<DataResponse<BookingPdfOutcome>>> {
    let booking = find_booking(&state.pool, booking_id).await?;
    authorize(&auth, booking.user_id, booking.organizer_id, "generate PDFs for")?;

    let outcome = state
        .pdf_service
        .generate_booking_tickets_pdfs(booking_id)
        .await?;

    tracing::info!(
        booking_id,
        total = outcome.total_tickets,
        generated = outcome.success_count,
        "Booking PDF batch finished",
    );

    Ok(Json(DataResponse { data: outcome }))
}
