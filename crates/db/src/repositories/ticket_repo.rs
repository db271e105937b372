//! Repository for the `booking_tickets` table.

use beout_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket::{TicketDetail, TicketRenderRow};

/// Columns of the detail join shared by [`TicketRepo::find_detail`] and
/// [`TicketRepo::list_for_booking`].
const DETAIL_COLUMNS: &str = "bt.id, bt.booking_id, bt.ticket_number, bt.holder_name, \
     bt.pdf_file_url, bt.pdf_generated_at, bt.created_at, \
     b.booking_reference, b.user_id, e.title AS event_title, e.event_date, e.organizer_id";

/// Queries over tickets and their joined booking/event context.
pub struct TicketRepo;

impl TicketRepo {
    /// Load a ticket with booking and event display fields.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TicketDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM booking_tickets bt \
             JOIN bookings b ON bt.booking_id = b.id \
             JOIN events e ON b.event_id = e.id \
             WHERE bt.id = $1"
        );
        sqlx::query_as::<_, TicketDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the full joined row set the renderer consumes: ticket,
    /// booking, event, venue, category, template configuration and the
    /// holder's display name (profile name with email fallback).
    pub async fn find_render_row(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TicketRenderRow>, sqlx::Error> {
        sqlx::query_as::<_, TicketRenderRow>(
            "SELECT \
                bt.id AS ticket_id, \
                bt.booking_id, \
                bt.ticket_number, \
                bt.holder_name, \
                bt.created_at, \
                b.booking_reference, \
                b.booking_date, \
                e.id AS event_id, \
                e.title AS event_title, \
                e.event_date, \
                e.customizations AS event_customizations, \
                tt.configuration AS template_configuration, \
                v.name AS venue_name, \
                c.name AS category_name, \
                COALESCE(bt.holder_name, \
                         NULLIF(TRIM(CONCAT(up.first_name, ' ', up.last_name)), ''), \
                         u.email) AS user_name \
             FROM booking_tickets bt \
             JOIN bookings b ON bt.booking_id = b.id \
             JOIN events e ON b.event_id = e.id \
             JOIN users u ON b.user_id = u.id \
             LEFT JOIN user_profiles up ON u.id = up.user_id \
             LEFT JOIN venues v ON e.venue_id = v.id \
             LEFT JOIN categories c ON e.category_id = c.id \
             LEFT JOIN ticket_templates tt ON e.ticket_template_id = tt.id \
             WHERE bt.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Ticket ids for a booking in ascending ticket-number order — the
    /// order the batch producer processes them in.
    pub async fn list_ids_for_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM booking_tickets WHERE booking_id = $1 ORDER BY ticket_number",
        )
        .bind(booking_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// All tickets of a booking with display fields, ordered by number.
    pub async fn list_for_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<TicketDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM booking_tickets bt \
             JOIN bookings b ON bt.booking_id = b.id \
             JOIN events e ON b.event_id = e.id \
             WHERE bt.booking_id = $1 \
             ORDER BY bt.ticket_number"
        );
        sqlx::query_as::<_, TicketDetail>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Record a generated artifact: file URL and generation timestamp
    /// are set together. Returns `false` if the ticket row is gone.
    pub async fn set_pdf_artifact(
        pool: &PgPool,
        id: DbId,
        pdf_file_url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE booking_tickets \
             SET pdf_file_url = $2, pdf_generated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(pdf_file_url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
