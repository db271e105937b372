//! QR symbol encoding as an embeddable PNG data URI.
//!
//! The ticket document must be self-contained, so the QR symbol is
//! rendered to PNG in-process and inlined as a `data:` URI instead of a
//! separate request the conversion engine would have to fetch.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageBuffer, ImageEncoder, Luma};
use qrcode::types::Color;
use qrcode::{EcLevel, QrCode};

/// Quiet zone around the symbol, in modules.
const QUIET_ZONE_MODULES: u32 = 1;

/// Errors raised while encoding the QR symbol.
///
/// Callers degrade to an empty QR block instead of aborting the render.
#[derive(Debug, thiserror::Error)]
pub enum QrImageError {
    /// The payload could not be encoded as a QR symbol (e.g. too long).
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// PNG serialization failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encode `content` as a QR symbol and return it as a PNG data URI.
///
/// Error correction level M, one quiet-zone module, black on white.
/// The symbol is scaled to at least `target_px` on each edge (whole
/// pixels per module, so the result may be slightly larger; CSS sizes
/// the `<img>` down to the exact profile dimension).
pub fn qr_png_data_uri(content: &str, target_px: u32) -> Result<String, QrImageError> {
    let code = QrCode::with_error_correction_level(content, EcLevel::M)?;

    let modules = code.width() as u32;
    let total_modules = modules + 2 * QUIET_ZONE_MODULES;
    let scale = (target_px / total_modules).max(1) + 1;
    let image_size = total_modules * scale;

    let mut img = ImageBuffer::from_pixel(image_size, image_size, Luma([255u8]));
    let colors = code.to_colors();

    for y in 0..modules {
        for x in 0..modules {
            let index = (y * modules + x) as usize;
            if colors[index] == Color::Dark {
                let x0 = (x + QUIET_ZONE_MODULES) * scale;
                let y0 = (y + QUIET_ZONE_MODULES) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
                    }
                }
            }
        }
    }

    let mut png_bytes = Vec::new();
    PngEncoder::new(&mut png_bytes).write_image(
        img.as_raw(),
        image_size,
        image_size,
        ExtendedColorType::L8,
    )?;

    Ok(format!("data:image/png;base64,{}", BASE64.encode(&png_bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_png_data_uri() {
        let uri = qr_png_data_uri("BO-2025-0042-T01", 90).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        // The payload decodes back to a PNG header.
        let encoded = uri.trim_start_matches("data:image/png;base64,");
        let bytes = BASE64.decode(encoded).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn oversized_payload_errors_instead_of_panicking() {
        let payload = "x".repeat(10_000);
        assert!(qr_png_data_uri(&payload, 90).is_err());
    }
}
