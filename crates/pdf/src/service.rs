//! The batch PDF producer.
//!
//! Orchestrates generation for one ticket or a whole booking: load the
//! joined row set, merge the template/event configuration, render the
//! HTML document, convert through the engine seam, write the artifact
//! and record it on the ticket row. In the booking path each ticket's
//! failure is recorded and the batch continues; nothing is retried here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use beout_core::context::{EventContext, TicketContext};
use beout_core::render::render_ticket_html;
use beout_core::ticket_config::TicketConfig;
use beout_core::types::DbId;
use beout_db::models::ticket::TicketRenderRow;
use beout_db::repositories::TicketRepo;
use beout_db::DbPool;
use serde::Serialize;

use crate::engine::{EngineError, HtmlToPdf, PdfPageOptions};

/// Subdirectory of the upload directory holding ticket artifacts.
const TICKETS_SUBDIR: &str = "tickets";

/// Web path prefix matching the static file mount.
const TICKETS_URL_PREFIX: &str = "/uploads/tickets";

/// Filesystem and URL configuration for the producer.
#[derive(Debug, Clone)]
pub struct PdfServiceConfig {
    /// Root upload directory; artifacts land in `{upload_dir}/tickets`.
    pub upload_dir: PathBuf,
    /// Directory holding logo assets referenced by templates.
    pub asset_dir: PathBuf,
    /// Public client URL used by the link QR policies.
    pub base_url: String,
}

/// Errors from the single-ticket generation path.
#[derive(Debug, thiserror::Error)]
pub enum TicketPdfError {
    /// No ticket row matches the requested id. Surfaced to the caller
    /// before any filesystem or database write.
    #[error("Ticket {0} not found")]
    TicketNotFound(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to write PDF artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of generating one ticket's PDF.
#[derive(Debug, Clone, Serialize)]
pub struct TicketPdfOutcome {
    pub success: bool,
    /// Absolute path of the written artifact.
    pub pdf_path: PathBuf,
    /// Web-relative URL recorded on the ticket row.
    pub pdf_url: String,
    pub ticket_number: String,
}

/// One entry in a booking batch result.
#[derive(Debug, Clone, Serialize)]
pub struct TicketBatchResult {
    pub success: bool,
    pub ticket_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of a booking batch.
#[derive(Debug, Clone, Serialize)]
pub struct BookingPdfOutcome {
    /// The batch itself ran; individual failures are in `results`.
    pub success: bool,
    pub results: Vec<TicketBatchResult>,
    pub total_tickets: usize,
    pub success_count: usize,
}

/// PDF generation service. One instance per process, sharing one
/// conversion engine across calls.
pub struct PdfTicketService {
    pool: DbPool,
    engine: Arc<dyn HtmlToPdf>,
    config: PdfServiceConfig,
}

impl PdfTicketService {
    pub fn new(pool: DbPool, engine: Arc<dyn HtmlToPdf>, config: PdfServiceConfig) -> Self {
        Self {
            pool,
            engine,
            config,
        }
    }

    /// Generate the PDF for a single ticket.
    ///
    /// Loads the joined row set, renders, converts, writes the artifact
    /// under the upload directory (a fresh timestamped filename per
    /// call, so regeneration never overwrites an earlier artifact) and
    /// records the URL and generation timestamp on the ticket row.
    pub async fn generate_ticket_pdf(
        &self,
        ticket_id: DbId,
    ) -> Result<TicketPdfOutcome, TicketPdfError> {
        let row = TicketRepo::find_render_row(&self.pool, ticket_id)
            .await?
            .ok_or(TicketPdfError::TicketNotFound(ticket_id))?;

        let config = TicketConfig::effective(
            row.template_configuration.as_ref(),
            row.event_customizations.as_ref(),
        )
        .resolve();

        let (ticket, event) = contexts_from_row(&row);

        let logo_data_uri = match &config.app_logo {
            Some(name) => load_logo_data_uri(&self.config.asset_dir, name).await,
            None => None,
        };

        let rendered = render_ticket_html(
            &ticket,
            &event,
            &config,
            &self.config.base_url,
            logo_data_uri.as_deref(),
        );
        if let Some(qr_error) = &rendered.qr_error {
            // Degraded output: the document was produced without a QR
            // symbol; the conversion still proceeds.
            tracing::warn!(
                ticket_id,
                error = %qr_error,
                "QR encoding failed, rendering ticket without QR symbol",
            );
        }

        let page_options = PdfPageOptions::for_ticket_size(config.ticket_size);
        let pdf_bytes = self.engine.convert(&rendered.html, &page_options).await?;

        let tickets_dir = self.config.upload_dir.join(TICKETS_SUBDIR);
        tokio::fs::create_dir_all(&tickets_dir).await?;

        let file_name = format!(
            "ticket-{}-{}.pdf",
            row.ticket_number,
            chrono::Utc::now().timestamp_millis()
        );
        let pdf_path = tickets_dir.join(&file_name);
        tokio::fs::write(&pdf_path, &pdf_bytes).await?;

        let pdf_url = format!("{TICKETS_URL_PREFIX}/{file_name}");
        TicketRepo::set_pdf_artifact(&self.pool, ticket_id, &pdf_url).await?;

        tracing::info!(
            ticket_id,
            ticket_number = %row.ticket_number,
            pdf_url = %pdf_url,
            "Ticket PDF generated",
        );

        Ok(TicketPdfOutcome {
            success: true,
            pdf_path,
            pdf_url,
            ticket_number: row.ticket_number,
        })
    }

    /// Generate PDFs for every ticket in a booking, sequentially and in
    /// ascending ticket-number order.
    ///
    /// A failing ticket is recorded in `results` and the batch moves on
    /// to the next ticket; the caller decides whether partial success
    /// warrants a re-run.
    pub async fn generate_booking_tickets_pdfs(
        &self,
        booking_id: DbId,
    ) -> Result<BookingPdfOutcome, TicketPdfError> {
        let ticket_ids = TicketRepo::list_ids_for_booking(&self.pool, booking_id).await?;

        let mut results = Vec::with_capacity(ticket_ids.len());
        for &ticket_id in &ticket_ids {
            match self.generate_ticket_pdf(ticket_id).await {
                Ok(outcome) => results.push(TicketBatchResult {
                    success: true,
                    ticket_id,
                    ticket_number: Some(outcome.ticket_number),
                    pdf_url: Some(outcome.pdf_url),
                    error: None,
                }),
                Err(e) => {
                    tracing::error!(
                        booking_id,
                        ticket_id,
                        error = %e,
                        "Ticket PDF generation failed, continuing batch",
                    );
                    results.push(TicketBatchResult {
                        success: false,
                        ticket_id,
                        ticket_number: None,
                        pdf_url: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let success_count = results.iter().filter(|r| r.success).count();
        Ok(BookingPdfOutcome {
            success: true,
            results,
            total_tickets: ticket_ids.len(),
            success_count,
        })
    }
}

/// Split the joined row into the renderer's ticket and event views.
fn contexts_from_row(row: &TicketRenderRow) -> (TicketContext, EventContext) {
    let ticket = TicketContext {
        id: row.ticket_id,
        booking_id: row.booking_id,
        ticket_number: row.ticket_number.clone(),
        booking_reference: row.booking_reference.clone(),
        holder_name: row.user_name.clone(),
        booking_date: row.booking_date,
        created_at: row.created_at,
    };
    let event = EventContext {
        id: row.event_id,
        title: row.event_title.clone(),
        date: row.event_date,
        venue_name: row.venue_name.clone(),
        category_name: row.category_name.clone(),
    };
    (ticket, event)
}

/// Read a logo asset and encode it as a data URI. Any failure degrades
/// to no watermark.
async fn load_logo_data_uri(asset_dir: &Path, file_name: &str) -> Option<String> {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    let path = asset_dir.join(file_name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = match path.extension().and_then(|e| e.to_str()) {
                Some("png") => "image/png",
                _ => "image/jpeg",
            };
            Some(format!("data:{mime};base64,{}", BASE64.encode(&bytes)))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Logo asset unreadable, skipping watermark");
            None
        }
    }
}
