//! QR code rasterisation.
//!
//! Symbol encoding is delegated to the `qrcode` crate. This module only lays
//! the modules out on a square canvas and serialises it to PNG.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use qrcode::QrCode;
use tracing::debug;

pub use qrcode::EcLevel;

use crate::color::Color;

/// Light modules kept around the symbol on every side.
const QUIET_ZONE: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum QrEncodeError {
    #[error("{0}")]
    Encode(String),
    #[error("PNG encode error: {0}")]
    Image(#[from] image::ImageError),
}

/// Rendering options for [`encode_png`] and [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    /// Requested edge length in pixels. Raised to the natural symbol size
    /// when smaller.
    pub size: u32,
    pub error_correction: EcLevel,
    pub background: Color,
    pub foreground: Color,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 256,
            error_correction: EcLevel::M,
            background: Color::WHITE,
            foreground: Color::BLACK,
        }
    }
}

/// Render `text` as a square QR code image.
///
/// The canvas is `max(size, modules + 2 * QUIET_ZONE)` pixels wide. Every
/// module gets the same whole number of pixels and the symbol is centred, so
/// the leftover border is filled with the background color.
pub fn render(text: &str, options: &QrOptions) -> Result<RgbaImage, QrEncodeError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), options.error_correction)
        .map_err(|e| QrEncodeError::Encode(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let real_size = module_count + 2 * QUIET_ZONE;
    let side = options.size.max(real_size);
    let scale = side / real_size;
    let offset = (side - real_size * scale) / 2 + QUIET_ZONE * scale;

    let mut img = RgbaImage::from_pixel(side, side, options.background.into());
    let dark = options.foreground.into();

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(offset + x * scale + dx, offset + y * scale + dy, dark);
            }
        }
    }

    debug!(
        version_modules = module_count,
        side,
        scale,
        "Rendered QR code"
    );

    Ok(img)
}

/// Render `text` and return the PNG-encoded bytes.
pub fn encode_png(text: &str, options: &QrOptions) -> Result<Vec<u8>, QrEncodeError> {
    let img = render(text, options)?;

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img).write_to(&mut buffer, ImageFormat::Png)?;

    Ok(buffer.into_inner())
}
