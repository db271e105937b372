//! Booking row structs.

use beout_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookings` table plus the event's organizer, for
/// display and access checks.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub booking_reference: String,
    pub booking_date: Timestamp,
    pub event_title: String,
    /// Event organizer; used for access checks, not exposed to clients.
    #[serde(skip_serializing)]
    pub organizer_id: DbId,
}
