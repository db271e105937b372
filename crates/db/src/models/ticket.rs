//! Ticket row structs and the joined render row.

use beout_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `booking_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub booking_id: DbId,
    pub ticket_number: String,
    pub holder_name: Option<String>,
    pub customizations: Option<serde_json::Value>,
    /// Web-relative path under `/uploads/tickets/`, set by the producer.
    pub pdf_file_url: Option<String>,
    /// Set atomically with `pdf_file_url`.
    pub pdf_generated_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Ticket plus the booking/event fields needed for display and access
/// checks (owner, organizer).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketDetail {
    pub id: DbId,
    pub booking_id: DbId,
    pub ticket_number: String,
    pub holder_name: Option<String>,
    pub pdf_file_url: Option<String>,
    pub pdf_generated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub booking_reference: String,
    pub event_title: String,
    pub event_date: Timestamp,
    /// Owning user; used for access checks, not exposed to clients.
    #[serde(skip_serializing)]
    pub user_id: DbId,
    /// Event organizer; used for access checks, not exposed to clients.
    #[serde(skip_serializing)]
    pub organizer_id: DbId,
}

/// Everything the renderer needs for one ticket, in a single join.
#[derive(Debug, Clone, FromRow)]
pub struct TicketRenderRow {
    pub ticket_id: DbId,
    pub booking_id: DbId,
    pub ticket_number: String,
    pub holder_name: Option<String>,
    pub created_at: Timestamp,
    pub booking_reference: String,
    pub booking_date: Timestamp,
    pub event_id: DbId,
    pub event_title: String,
    pub event_date: Timestamp,
    /// Event-level configuration overrides (wins over the template).
    pub event_customizations: Option<serde_json::Value>,
    /// The referenced template's configuration document, if any.
    pub template_configuration: Option<serde_json::Value>,
    pub venue_name: Option<String>,
    pub category_name: Option<String>,
    /// Profile name with email fallback, for the holder line.
    pub user_name: Option<String>,
}
