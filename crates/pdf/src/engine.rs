//! The HTML-to-PDF conversion seam.
//!
//! The producer talks to the headless engine through [`HtmlToPdf`] so
//! tests can substitute a deterministic converter and so the Chromium
//! dependency stays contained in [`crate::chromium`].

use async_trait::async_trait;
use beout_core::layout::TicketSize;

/// Millimeters per inch (CDP paper sizes are expressed in inches).
const MM_PER_INCH: f64 = 25.4;

/// Print margin on every side, in millimeters.
const MARGIN_MM: f64 = 5.0;

/// Page geometry for one conversion.
///
/// Paper formats follow the ticket size: A4 portrait, A5 landscape for
/// half tickets, A6 portrait for quarter tickets. Backgrounds are always
/// printed (the gradient header and background image are backgrounds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfPageOptions {
    /// Paper width in millimeters (before landscape rotation).
    pub paper_width_mm: f64,
    /// Paper height in millimeters (before landscape rotation).
    pub paper_height_mm: f64,
    pub landscape: bool,
    /// Margin applied on all four sides, in millimeters.
    pub margin_mm: f64,
}

impl PdfPageOptions {
    /// Derive page geometry from the ticket size.
    pub fn for_ticket_size(size: TicketSize) -> Self {
        match size {
            // A4 portrait.
            TicketSize::A4 => Self {
                paper_width_mm: 210.0,
                paper_height_mm: 297.0,
                landscape: false,
                margin_mm: MARGIN_MM,
            },
            // A5 landscape: 210 x 148 once rotated.
            TicketSize::HalfA4 => Self {
                paper_width_mm: 148.0,
                paper_height_mm: 210.0,
                landscape: true,
                margin_mm: MARGIN_MM,
            },
            // A6 portrait.
            TicketSize::QuarterA4 => Self {
                paper_width_mm: 105.0,
                paper_height_mm: 148.0,
                landscape: false,
                margin_mm: MARGIN_MM,
            },
        }
    }

    /// Paper width in inches, as CDP expects.
    pub fn paper_width_in(&self) -> f64 {
        self.paper_width_mm / MM_PER_INCH
    }

    /// Paper height in inches, as CDP expects.
    pub fn paper_height_in(&self) -> f64 {
        self.paper_height_mm / MM_PER_INCH
    }

    /// Margin in inches, as CDP expects.
    pub fn margin_in(&self) -> f64 {
        self.margin_mm / MM_PER_INCH
    }
}

/// Errors from the conversion engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine process could not be started.
    #[error("Failed to launch conversion engine: {0}")]
    Launch(String),

    /// The engine failed while printing the document.
    #[error("PDF conversion failed: {0}")]
    Conversion(String),
}

/// Converts a standalone HTML document into PDF bytes.
#[async_trait]
pub trait HtmlToPdf: Send + Sync {
    async fn convert(&self, html: &str, options: &PdfPageOptions) -> Result<Vec<u8>, EngineError>;
}
