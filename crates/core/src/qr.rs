//! QR payload resolution.
//!
//! Given the configured QR policy and the ticket/event data, produce the
//! exact string encoded into the ticket's QR symbol. Pure and total:
//! every branch has a deterministic fallback, so resolution never fails.

use serde_json::json;

use crate::context::{EventContext, TicketContext};
use crate::hashing::sha256_hex;

/// Fallback ticket number used by `prefixed_number` when both the ticket
/// number and the booking reference are absent.
const FALLBACK_NUMBER: &str = "001";

/// Default prefix for the `prefixed_number` policy.
const DEFAULT_PREFIX: &str = "TICKET";

/// QR payload policy configured on a template or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrCodeType {
    /// `{base_url}/verify/{ticket_number}` — scannable verification link.
    VerificationUrl,
    /// The ticket's own number. Also the fallback for unknown policies.
    BookingReference,
    /// SHA-256 digest binding booking id, ticket number and creation time.
    TicketHash,
    /// Organizer-supplied JSON payload, validated by round-tripping.
    CustomData,
    /// `{prefix}{number}{suffix}` built from the QR configuration.
    PrefixedNumber,
    /// JSON object of ticket/event fields plus configured extras.
    JsonData,
    /// A configured URL, defaulting to the event's public page.
    SimpleUrl,
}

impl Default for QrCodeType {
    fn default() -> Self {
        QrCodeType::BookingReference
    }
}

impl QrCodeType {
    /// Parse a configuration string. Unknown values resolve to
    /// [`QrCodeType::BookingReference`], whose payload matches the
    /// documented fallback (the ticket number).
    pub fn parse(value: &str) -> Self {
        match value {
            "verification_url" => QrCodeType::VerificationUrl,
            "booking_reference" => QrCodeType::BookingReference,
            "ticket_hash" => QrCodeType::TicketHash,
            "custom_data" => QrCodeType::CustomData,
            "prefixed_number" => QrCodeType::PrefixedNumber,
            "json_data" => QrCodeType::JsonData,
            "simple_url" => QrCodeType::SimpleUrl,
            _ => QrCodeType::BookingReference,
        }
    }

    /// Human-readable caption shown under the QR symbol on the ticket.
    pub fn caption(self) -> &'static str {
        match self {
            QrCodeType::VerificationUrl => "Lien de vérification",
            QrCodeType::BookingReference => "Référence",
            QrCodeType::TicketHash => "Hash sécurisé",
            QrCodeType::CustomData => "Données custom",
            QrCodeType::PrefixedNumber => "Code personnalisé",
            QrCodeType::JsonData => "Données JSON",
            QrCodeType::SimpleUrl => "URL personnalisée",
        }
    }
}

/// QR-specific knobs from the effective render configuration.
#[derive(Debug, Clone, Default)]
pub struct QrConfig {
    /// Prefix for `prefixed_number` (default `TICKET`).
    pub prefix: Option<String>,
    /// Suffix for `prefixed_number` (default empty).
    pub suffix: Option<String>,
    /// Extra fields merged over the fixed `json_data` object.
    pub json_fields: serde_json::Map<String, serde_json::Value>,
    /// Override URL for `simple_url`.
    pub custom_url: Option<String>,
}

/// Resolve the exact QR payload for one ticket.
///
/// `custom_data` is the organizer-supplied raw string for the
/// `custom_data` policy; `base_url` is the public client URL used by the
/// link policies.
pub fn resolve_qr_content(
    qr_type: QrCodeType,
    ticket: &TicketContext,
    event: &EventContext,
    custom_data: Option<&str>,
    qr: &QrConfig,
    base_url: &str,
) -> String {
    match qr_type {
        QrCodeType::VerificationUrl => {
            format!("{base_url}/verify/{}", ticket.ticket_number)
        }
        QrCodeType::BookingReference => ticket.ticket_number.clone(),
        QrCodeType::TicketHash => sha256_hex(
            format!(
                "{}-{}-{}",
                ticket.booking_id,
                ticket.ticket_number,
                ticket.created_at.to_rfc3339()
            )
            .as_bytes(),
        ),
        QrCodeType::CustomData => match custom_data {
            // Round-trip through serde_json to validate the payload is
            // well-formed JSON before encoding it.
            Some(raw) if !raw.is_empty() => serde_json::from_str::<serde_json::Value>(raw)
                .and_then(|v| serde_json::to_string(&v))
                .unwrap_or_else(|_| ticket.ticket_number.clone()),
            _ => ticket.ticket_number.clone(),
        },
        QrCodeType::PrefixedNumber => {
            let prefix = qr.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
            let suffix = qr.suffix.as_deref().unwrap_or("");
            let number = if !ticket.ticket_number.is_empty() {
                ticket.ticket_number.as_str()
            } else if !ticket.booking_reference.is_empty() {
                ticket.booking_reference.as_str()
            } else {
                FALLBACK_NUMBER
            };
            format!("{prefix}{number}{suffix}")
        }
        QrCodeType::JsonData => {
            let mut fields = serde_json::Map::new();
            fields.insert("event_id".into(), json!(event.id));
            fields.insert("ticket_number".into(), json!(ticket.ticket_number));
            fields.insert("booking_id".into(), json!(ticket.booking_id));
            fields.insert("event_title".into(), json!(event.title));
            fields.insert("user_name".into(), json!(ticket.holder_name));
            fields.insert("event_date".into(), json!(event.date.to_rfc3339()));
            for (key, value) in &qr.json_fields {
                fields.insert(key.clone(), value.clone());
            }
            serde_json::to_string(&fields).unwrap_or_else(|_| ticket.ticket_number.clone())
        }
        QrCodeType::SimpleUrl => qr
            .custom_url
            .clone()
            .unwrap_or_else(|| format!("{base_url}/event/{}", event.id)),
    }
}
