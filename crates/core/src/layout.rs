//! Ticket size and layout profiles.
//!
//! Pages are sized in millimeters while QR and font sizes are CSS pixels
//! (96 dpi convention); the conversion engine prints with
//! `prefer_css_page_size` off so both coexist on the same document.

use serde::{Deserialize, Serialize};

/// Physical format of a rendered ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketSize {
    A4,
    HalfA4,
    QuarterA4,
}

impl Default for TicketSize {
    fn default() -> Self {
        TicketSize::A4
    }
}

impl TicketSize {
    /// Parse a configuration string. Unknown values fall back to `a4`.
    pub fn parse(value: &str) -> Self {
        match value {
            "half-a4" => TicketSize::HalfA4,
            "quarter-a4" => TicketSize::QuarterA4,
            _ => TicketSize::A4,
        }
    }

    /// Configuration string form (`a4`, `half-a4`, `quarter-a4`).
    pub fn as_str(self) -> &'static str {
        match self {
            TicketSize::A4 => "a4",
            TicketSize::HalfA4 => "half-a4",
            TicketSize::QuarterA4 => "quarter-a4",
        }
    }

    /// Dimension and layout profile for this size.
    pub fn profile(self) -> SizeProfile {
        match self {
            TicketSize::A4 => SizeProfile {
                width_mm: 210,
                height_mm: 297,
                layout: LayoutKind::Standard,
                qr_px: 90,
                font_scale: 1.0,
            },
            TicketSize::HalfA4 => SizeProfile {
                width_mm: 210,
                height_mm: 148,
                layout: LayoutKind::TwoColumn,
                qr_px: 80,
                font_scale: 0.9,
            },
            TicketSize::QuarterA4 => SizeProfile {
                width_mm: 148,
                height_mm: 105,
                layout: LayoutKind::Compact,
                qr_px: 70,
                font_scale: 0.7,
            },
        }
    }
}

/// How the ticket body arranges event details and the QR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Single column, details above the QR block.
    Standard,
    /// Details on the left, QR block on the right.
    TwoColumn,
    /// Single column with tightened spacing.
    Compact,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Standard => "standard",
            LayoutKind::TwoColumn => "twoColumn",
            LayoutKind::Compact => "compact",
        }
    }
}

/// Resolved dimensions for one [`TicketSize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeProfile {
    /// Page width in millimeters.
    pub width_mm: u32,
    /// Page height in millimeters.
    pub height_mm: u32,
    pub layout: LayoutKind,
    /// Rendered QR symbol edge in CSS pixels.
    pub qr_px: u32,
    /// Multiplier applied to every font and spacing value.
    pub font_scale: f32,
}
