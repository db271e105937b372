//! Render-time views of a ticket and its event.
//!
//! These are plain data carriers assembled by the PDF producer from the
//! joined database row; the QR resolver and HTML renderer consume them
//! without touching the database.

use crate::types::{DbId, Timestamp};

/// One admission unit within a booking, as seen by the renderer.
#[derive(Debug, Clone)]
pub struct TicketContext {
    pub id: DbId,
    pub booking_id: DbId,
    /// Unique per booking, sequential (e.g. `BO-2025-0001-T01`).
    pub ticket_number: String,
    /// The booking's human-readable reference.
    pub booking_reference: String,
    /// Display name of the ticket holder; the renderer falls back to a
    /// generic label when absent.
    pub holder_name: Option<String>,
    /// When the booking was purchased.
    pub booking_date: Timestamp,
    pub created_at: Timestamp,
}

/// The occasion the ticket admits to.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub id: DbId,
    pub title: String,
    pub date: Timestamp,
    pub venue_name: Option<String>,
    pub category_name: Option<String>,
}
