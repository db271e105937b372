use std::sync::Arc;

use beout_pdf::PdfTicketService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: beout_db::DbPool,
    /// Server configuration (base URL, directories, JWT).
    pub config: Arc<ServerConfig>,
    /// The PDF generation service, sharing one conversion engine.
    pub pdf_service: Arc<PdfTicketService>,
}
