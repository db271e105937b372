//! Ticket template model and DTOs.

use beout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `ticket_templates` table.
///
/// `configuration` is the visual/QR document consumed by the renderer;
/// see `beout_core::ticket_config::TicketConfig` for its field set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketTemplate {
    pub id: DbId,
    pub organizer_id: DbId,
    /// Global templates are readable by every organizer.
    pub is_global: bool,
    pub name: String,
    pub description: Option<String>,
    pub configuration: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicketTemplate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub description: Option<String>,
    pub configuration: serde_json::Value,
}

/// DTO for updating an existing template. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTicketTemplate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub configuration: Option<serde_json::Value>,
}
