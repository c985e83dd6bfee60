//! Image generation for the QR service: hex color parsing and QR code
//! rasterisation to PNG.

pub mod color;
pub mod qr;

pub use color::{Color, ColorParseError, parse_color};
pub use qr::{EcLevel, QrEncodeError, QrOptions, encode_png, render};
