//! Ticket template configuration documents and the override merge.
//!
//! A template's `configuration` jsonb column and an event's
//! `customizations` column share the same field set; every field is
//! optional. At render time the two documents are shallow-merged (the
//! event wins per field) and defaults are applied, producing a fully
//! resolved [`RenderConfig`].

use serde::{Deserialize, Serialize};

use crate::layout::TicketSize;
use crate::qr::{QrCodeType, QrConfig};

/// Default primary brand color (hex).
pub const DEFAULT_PRIMARY_COLOR: &str = "#1976d2";

/// Default secondary brand color (hex).
pub const DEFAULT_SECONDARY_COLOR: &str = "#9c27b0";

/// Default logo asset filename, looked up in the asset directory.
pub const DEFAULT_APP_LOGO: &str = "be-out_logo_noir.png";

/// Raw, all-optional configuration document.
///
/// Unknown keys in the stored JSON are ignored; a document that fails to
/// deserialize entirely degrades to the empty configuration rather than
/// failing the render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    pub ticket_size: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_image: Option<String>,
    pub app_logo: Option<String>,
    pub custom_message: Option<String>,
    pub qr_code_type: Option<String>,
    pub qr_custom_data: Option<String>,
    pub qr_prefix: Option<String>,
    pub qr_suffix: Option<String>,
    pub qr_json_fields: Option<serde_json::Map<String, serde_json::Value>>,
    pub qr_custom_url: Option<String>,
}

impl TicketConfig {
    /// Deserialize a stored jsonb document, degrading to the empty
    /// configuration when the document is missing or malformed.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Shallow merge: fields set on `overrides` win, everything else
    /// passes through from `self`.
    pub fn merged_with(self, overrides: TicketConfig) -> TicketConfig {
        TicketConfig {
            ticket_size: overrides.ticket_size.or(self.ticket_size),
            primary_color: overrides.primary_color.or(self.primary_color),
            secondary_color: overrides.secondary_color.or(self.secondary_color),
            background_image: overrides.background_image.or(self.background_image),
            app_logo: overrides.app_logo.or(self.app_logo),
            custom_message: overrides.custom_message.or(self.custom_message),
            qr_code_type: overrides.qr_code_type.or(self.qr_code_type),
            qr_custom_data: overrides.qr_custom_data.or(self.qr_custom_data),
            qr_prefix: overrides.qr_prefix.or(self.qr_prefix),
            qr_suffix: overrides.qr_suffix.or(self.qr_suffix),
            qr_json_fields: overrides.qr_json_fields.or(self.qr_json_fields),
            qr_custom_url: overrides.qr_custom_url.or(self.qr_custom_url),
        }
    }

    /// Merge a template configuration with event-level customizations
    /// (event wins per field) straight from their stored jsonb values.
    pub fn effective(
        template: Option<&serde_json::Value>,
        event_customizations: Option<&serde_json::Value>,
    ) -> Self {
        Self::from_value(template).merged_with(Self::from_value(event_customizations))
    }

    /// Apply defaults, producing a fully resolved render configuration.
    pub fn resolve(self) -> RenderConfig {
        // An explicitly empty logo string disables the watermark.
        let app_logo = match self.app_logo {
            Some(name) if name.is_empty() => None,
            Some(name) => Some(name),
            None => Some(DEFAULT_APP_LOGO.to_string()),
        };

        RenderConfig {
            ticket_size: self
                .ticket_size
                .as_deref()
                .map(TicketSize::parse)
                .unwrap_or_default(),
            primary_color: self
                .primary_color
                .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string()),
            secondary_color: self
                .secondary_color
                .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_string()),
            background_image: self.background_image,
            app_logo,
            custom_message: self.custom_message.unwrap_or_default(),
            qr_code_type: self
                .qr_code_type
                .as_deref()
                .map(QrCodeType::parse)
                .unwrap_or_default(),
            qr_custom_data: self.qr_custom_data,
            qr: QrConfig {
                prefix: self.qr_prefix,
                suffix: self.qr_suffix,
                json_fields: self.qr_json_fields.unwrap_or_default(),
                custom_url: self.qr_custom_url,
            },
        }
    }
}

/// Fully resolved per-ticket render configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub ticket_size: TicketSize,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_image: Option<String>,
    /// Logo asset filename; `None` disables the watermark.
    pub app_logo: Option<String>,
    /// Extra message block under the ticket body; empty hides the block.
    pub custom_message: String,
    pub qr_code_type: QrCodeType,
    pub qr_custom_data: Option<String>,
    pub qr: QrConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_customizations_win_per_field() {
        let template = json!({ "primary_color": "#111" });
        let event = json!({ "primary_color": "#222", "custom_message": "hi" });

        let merged = TicketConfig::effective(Some(&template), Some(&event));

        assert_eq!(merged.primary_color.as_deref(), Some("#222"));
        assert_eq!(merged.custom_message.as_deref(), Some("hi"));
    }

    #[test]
    fn template_fields_pass_through_when_event_is_silent() {
        let template = json!({
            "ticket_size": "half-a4",
            "secondary_color": "#333"
        });
        let event = json!({ "custom_message": "merci" });

        let merged = TicketConfig::effective(Some(&template), Some(&event));

        assert_eq!(merged.ticket_size.as_deref(), Some("half-a4"));
        assert_eq!(merged.secondary_color.as_deref(), Some("#333"));
        assert_eq!(merged.custom_message.as_deref(), Some("merci"));
    }

    #[test]
    fn malformed_document_degrades_to_empty() {
        let malformed = json!("not an object");
        let merged = TicketConfig::effective(Some(&malformed), None);
        assert_eq!(merged, TicketConfig::default());
    }

    #[test]
    fn resolve_applies_defaults() {
        let config = TicketConfig::default().resolve();

        assert_eq!(config.ticket_size, TicketSize::A4);
        assert_eq!(config.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(config.secondary_color, DEFAULT_SECONDARY_COLOR);
        assert_eq!(config.app_logo.as_deref(), Some(DEFAULT_APP_LOGO));
        assert_eq!(config.custom_message, "");
        assert_eq!(config.qr_code_type, QrCodeType::BookingReference);
        assert!(config.background_image.is_none());
    }

    #[test]
    fn empty_logo_string_disables_watermark() {
        let config = TicketConfig {
            app_logo: Some(String::new()),
            ..TicketConfig::default()
        }
        .resolve();
        assert!(config.app_logo.is_none());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let doc = json!({ "primary_color": "#444", "not_a_field": 12 });
        let parsed = TicketConfig::from_value(Some(&doc));
        assert_eq!(parsed.primary_color.as_deref(), Some("#444"));
    }
}
