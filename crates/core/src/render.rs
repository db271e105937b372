//! The ticket HTML document.
//!
//! Produces a standalone document (inline `<style>`, data-URI images) so
//! the conversion engine can print it without network fetches beyond an
//! optional background image. All user-supplied text is HTML-escaped.

use crate::context::{EventContext, TicketContext};
use crate::layout::LayoutKind;
use crate::qr::resolve_qr_content;
use crate::qr_image::{qr_png_data_uri, QrImageError};
use crate::ticket_config::RenderConfig;
use crate::types::Timestamp;

/// Shown when the event has no venue attached.
const FALLBACK_LOCATION: &str = "Lieu à confirmer";

/// Shown when the ticket has no holder name.
const FALLBACK_HOLDER: &str = "Porteur du billet";

/// French month names for date display.
const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Outcome of rendering one ticket document.
///
/// QR encoding failure degrades to an empty QR block; the error is
/// carried here so the producer can log it.
#[derive(Debug)]
pub struct RenderedTicket {
    /// The complete HTML document.
    pub html: String,
    /// The payload that was (or would have been) encoded in the QR symbol.
    pub qr_payload: String,
    /// Set when the QR symbol could not be encoded.
    pub qr_error: Option<QrImageError>,
}

/// Render the complete HTML document for one ticket.
///
/// `logo_data_uri` is the pre-loaded logo asset; `None` omits the
/// watermark (the asset read is the producer's concern, keeping this
/// function free of I/O).
pub fn render_ticket_html(
    ticket: &TicketContext,
    event: &EventContext,
    config: &RenderConfig,
    base_url: &str,
    logo_data_uri: Option<&str>,
) -> RenderedTicket {
    let profile = config.ticket_size.profile();
    let scale = profile.font_scale as f64;

    let qr_payload = resolve_qr_content(
        config.qr_code_type,
        ticket,
        event,
        config.qr_custom_data.as_deref(),
        &config.qr,
        base_url,
    );

    let (qr_data_uri, qr_error) = match qr_png_data_uri(&qr_payload, profile.qr_px) {
        Ok(uri) => (Some(uri), None),
        Err(e) => (None, Some(e)),
    };

    let title = escape_html(&event.title);
    let location = escape_html(event.venue_name.as_deref().unwrap_or(FALLBACK_LOCATION));
    let holder = escape_html(ticket.holder_name.as_deref().unwrap_or(FALLBACK_HOLDER));
    let ticket_number = escape_html(&ticket.ticket_number);
    let formatted_date = format_date_fr(&event.date);
    let formatted_time = format_time(&event.date);
    let purchase_date = format_short_date(&ticket.booking_date);

    let style = document_style(config, &profile, scale);
    let body = document_body(
        config,
        &title,
        event.category_name.as_deref(),
        &formatted_date,
        &formatted_time,
        &location,
        &holder,
        &ticket_number,
        qr_data_uri.as_deref(),
        &purchase_date,
        logo_data_uri,
    );

    let html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>Billet - {title}</title>\n\
         <style>{style}</style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n"
    );

    RenderedTicket {
        html,
        qr_payload,
        qr_error,
    }
}

/// `09 juillet 2025` — day, full month name, year.
pub fn format_date_fr(ts: &Timestamp) -> String {
    use chrono::Datelike;
    let month = MONTHS_FR[ts.month0() as usize];
    format!("{:02} {} {}", ts.day(), month, ts.year())
}

/// `19:30` — 24-hour clock.
pub fn format_time(ts: &Timestamp) -> String {
    ts.format("%H:%M").to_string()
}

/// `09/07/2025` — compact numeric form used on the purchase line.
pub fn format_short_date(ts: &Timestamp) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// Minimal HTML escaping for interpolated text and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The inline stylesheet, parameterized by colors, size profile and the
/// font-scale factor.
fn document_style(
    config: &RenderConfig,
    profile: &crate::layout::SizeProfile,
    scale: f64,
) -> String {
    let px = |base: f64| format!("{:.0}", base * scale);

    let background = match &config.background_image {
        Some(url) => format!(
            "url({}); background-size: cover; background-position: center; background-repeat: no-repeat",
            escape_html(url)
        ),
        None => "#ffffff".to_string(),
    };

    let content_layout = match profile.layout {
        LayoutKind::TwoColumn => {
            "display: grid; grid-template-columns: 1.2fr 0.8fr; gap: 20px; align-items: start;"
        }
        LayoutKind::Standard | LayoutKind::Compact => {
            "display: flex; flex-direction: column; justify-content: space-between;"
        }
    };

    format!(
        "* {{ margin: 0; padding: 0; box-sizing: border-box; }}\n\
         body {{ font-family: 'Arial', sans-serif; background: #ffffff; color: #333; }}\n\
         .ticket {{ width: {width}mm; height: {height}mm; position: relative; \
           border: 2px dashed {primary}; border-radius: 8px; overflow: hidden; \
           display: flex; flex-direction: column; background: {background}; }}\n\
         .background-overlay {{ position: absolute; top: 0; left: 0; right: 0; bottom: 0; \
           background: rgba(255, 255, 255, 0.85); z-index: 1; }}\n\
         .ticket-header {{ background: linear-gradient(135deg, {primary} 0%, {secondary} 100%); \
           color: white; padding: {pad_v}px {pad_h}px; text-align: center; position: relative; z-index: 2; }}\n\
         .event-title {{ font-size: {title_fs}px; font-weight: bold; margin-bottom: {title_mb}px; line-height: 1.2; }}\n\
         .event-category {{ display: inline-block; background: rgba(255, 255, 255, 0.2); \
           padding: {cat_pad_v}px {cat_pad_h}px; border-radius: 12px; font-size: {cat_fs}px; font-weight: bold; }}\n\
         .ticket-content {{ flex: 1; padding: {content_pad}px; position: relative; z-index: 2; {content_layout} }}\n\
         .info-item {{ margin-bottom: {info_mb}px; }}\n\
         .info-label {{ font-size: {label_fs}px; font-weight: bold; color: #666; text-transform: uppercase; \
           letter-spacing: 0.5px; margin-bottom: {label_mb}px; display: block; }}\n\
         .info-value {{ font-size: {value_fs}px; font-weight: 500; color: #333; display: block; }}\n\
         .ticket-info {{ display: flex; flex-direction: column; align-items: center; text-align: center; gap: {info_gap}px; }}\n\
         .ticket-number-label {{ font-size: {label_fs}px; font-weight: bold; color: #666; \
           text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: {label_mb}px; }}\n\
         .ticket-number {{ font-size: {value_fs}px; font-weight: 600; font-family: 'Courier New', monospace; color: #333; }}\n\
         .qr-section {{ text-align: center; }}\n\
         .qr-code {{ width: {qr_px}px; height: {qr_px}px; margin: 0 auto {qr_mb}px auto; display: block; }}\n\
         .qr-placeholder {{ width: {qr_px}px; height: {qr_px}px; margin: 0 auto {qr_mb}px auto; \
           border: 1px dashed #ccc; }}\n\
         .qr-label {{ font-size: {qr_label_fs}px; color: #666; font-weight: bold; text-transform: uppercase; \
           margin-bottom: {label_mb}px; }}\n\
         .qr-type {{ font-size: {qr_type_fs}px; color: #888; }}\n\
         .purchase-date {{ font-size: {qr_label_fs}px; color: #666; text-align: center; }}\n\
         .custom-message {{ margin-top: {msg_mt}px; padding: {msg_pad}px; background: rgba(0, 0, 0, 0.05); \
           border-radius: 6px; text-align: center; font-style: italic; font-size: {msg_fs}px; color: #555; }}\n\
         .app-logo {{ position: absolute; bottom: {logo_off}px; right: {logo_off}px; width: {logo_w}px; \
           height: auto; opacity: 0.7; z-index: 3; }}\n\
         @page {{ size: {width}mm {height}mm; margin: 0; }}\n",
        width = profile.width_mm,
        height = profile.height_mm,
        primary = escape_html(&config.primary_color),
        secondary = escape_html(&config.secondary_color),
        background = background,
        content_layout = content_layout,
        qr_px = profile.qr_px,
        pad_v = px(15.0),
        pad_h = px(20.0),
        title_fs = px(24.0),
        title_mb = px(8.0),
        cat_pad_v = px(4.0),
        cat_pad_h = px(8.0),
        cat_fs = px(10.0),
        content_pad = px(20.0),
        info_mb = px(12.0),
        label_fs = px(10.0),
        label_mb = px(4.0),
        value_fs = px(14.0),
        info_gap = px(15.0),
        qr_mb = px(8.0),
        qr_label_fs = px(9.0),
        qr_type_fs = px(8.0),
        msg_mt = px(15.0),
        msg_pad = px(10.0),
        msg_fs = px(11.0),
        logo_off = px(10.0),
        logo_w = px(25.0),
    )
}

/// The document body: header band, details, number/QR blocks, optional
/// message and watermark.
#[allow(clippy::too_many_arguments)]
fn document_body(
    config: &RenderConfig,
    title: &str,
    category_name: Option<&str>,
    formatted_date: &str,
    formatted_time: &str,
    location: &str,
    holder: &str,
    ticket_number: &str,
    qr_data_uri: Option<&str>,
    purchase_date: &str,
    logo_data_uri: Option<&str>,
) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"ticket\">\n");

    if config.background_image.is_some() {
        body.push_str("<div class=\"background-overlay\"></div>\n");
    }

    body.push_str("<div class=\"ticket-header\">\n");
    body.push_str(&format!("<div class=\"event-title\">{title}</div>\n"));
    if let Some(category) = category_name {
        body.push_str(&format!(
            "<div class=\"event-category\">{}</div>\n",
            escape_html(category)
        ));
    }
    body.push_str("</div>\n");

    body.push_str("<div class=\"ticket-content\">\n<div class=\"event-details\">\n");
    body.push_str(&format!(
        "<div class=\"info-item\">\
         <span class=\"info-label\">Date &amp; Heure</span>\
         <span class=\"info-value\">{formatted_date} - {formatted_time}</span></div>\n"
    ));
    body.push_str(&format!(
        "<div class=\"info-item\">\
         <span class=\"info-label\">Lieu</span>\
         <span class=\"info-value\">{location}</span></div>\n"
    ));
    body.push_str(&format!(
        "<div class=\"info-item\">\
         <span class=\"info-label\">Porteur</span>\
         <span class=\"info-value\">{holder}</span></div>\n"
    ));
    body.push_str("</div>\n");

    body.push_str("<div class=\"ticket-info\">\n");
    body.push_str(&format!(
        "<div class=\"ticket-number-section\">\
         <div class=\"ticket-number-label\">N° Billet</div>\
         <div class=\"ticket-number\">{ticket_number}</div></div>\n"
    ));

    body.push_str("<div class=\"qr-section\">\n");
    match qr_data_uri {
        Some(uri) => body.push_str(&format!(
            "<img src=\"{uri}\" alt=\"QR Code\" class=\"qr-code\" />\n"
        )),
        // Degraded output: keep the block's footprint, omit the symbol.
        None => body.push_str("<div class=\"qr-placeholder\"></div>\n"),
    }
    body.push_str("<div class=\"qr-label\">QR Code</div>\n");
    body.push_str(&format!(
        "<div class=\"qr-type\">{}</div>\n",
        config.qr_code_type.caption()
    ));
    body.push_str("</div>\n");

    body.push_str(&format!(
        "<div class=\"purchase-date\">Acheté le {purchase_date}</div>\n"
    ));
    body.push_str("</div>\n</div>\n");

    if !config.custom_message.is_empty() {
        body.push_str(&format!(
            "<div class=\"custom-message\">{}</div>\n",
            escape_html(&config.custom_message)
        ));
    }

    if let Some(logo) = logo_data_uri {
        body.push_str(&format!(
            "<img src=\"{logo}\" class=\"app-logo\" alt=\"Logo\"/>\n"
        ));
    }

    body.push_str("</div>\n");
    body
}
