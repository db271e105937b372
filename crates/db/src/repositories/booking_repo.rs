//! Repository for the `bookings` table.

use beout_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::BookingDetail;

/// Queries over bookings and their owning event.
pub struct BookingRepo;

impl BookingRepo {
    /// Load a booking with the event title and organizer, for display
    /// and access checks.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingDetail>, sqlx::Error> {
        sqlx::query_as::<_, BookingDetail>(
            "SELECT b.id, b.user_id, b.event_id, b.booking_reference, b.booking_date, \
                    e.title AS event_title, e.organizer_id \
             FROM bookings b \
             JOIN events e ON b.event_id = e.id \
             WHERE b.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
