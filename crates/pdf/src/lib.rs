//! PDF ticket production.
//!
//! - [`engine`] — the [`engine::HtmlToPdf`] conversion seam and page
//!   geometry derived from the ticket size.
//! - [`chromium`] — the headless Chromium implementation (CDP via
//!   `chromiumoxide`), one lazily-launched shared browser process.
//! - [`service`] — the batch producer: loads ticket rows, renders HTML,
//!   converts, writes artifacts and updates the database, isolating
//!   per-ticket failures across a booking.

pub mod chromium;
pub mod engine;
pub mod service;

pub use chromium::ChromiumEngine;
pub use engine::{EngineError, HtmlToPdf, PdfPageOptions};
pub use service::{
    BookingPdfOutcome, PdfServiceConfig, PdfTicketService, TicketBatchResult, TicketPdfError,
    TicketPdfOutcome,
};
