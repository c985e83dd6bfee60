//! Hex color parsing.

use std::fmt;
use std::num::IntErrorKind;

use image::Rgba;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Lowercase `rrggbb` form, without a leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("invalid color: empty value")]
    Empty,
    #[error("invalid color {0:?}: only hexadecimal digits are allowed")]
    InvalidDigit(String),
    #[error("invalid color {0:?}: value out of range")]
    Overflow(String),
}

/// Parse a hexadecimal color such as `ff8800`.
///
/// The input is read as an unsigned 32-bit integer; bits 16-23 become red,
/// 8-15 green and 0-7 blue. Alpha is always fully opaque. Anything outside
/// `[0-9a-fA-F]` is rejected, including signs and `0x` prefixes.
pub fn parse_color(hex: &str) -> Result<Color, ColorParseError> {
    if hex.is_empty() {
        return Err(ColorParseError::Empty);
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit(hex.to_string()));
    }

    let value = u32::from_str_radix(hex, 16).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ColorParseError::Overflow(hex.to_string()),
        _ => ColorParseError::InvalidDigit(hex.to_string()),
    })?;

    Ok(Color::rgb(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_channels_from_six_digits() {
        assert_eq!(parse_color("ff8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(parse_color("000000").unwrap(), Color::BLACK);
        assert_eq!(parse_color("FFFFFF").unwrap(), Color::WHITE);
    }

    #[test]
    fn alpha_is_always_opaque() {
        assert_eq!(parse_color("123456").unwrap().a, 255);
        assert_eq!(parse_color("ff123456").unwrap().a, 255);
    }

    #[test]
    fn short_input_is_read_as_an_integer() {
        // "ff" is 0x0000ff: only the blue channel is set.
        assert_eq!(parse_color("ff").unwrap(), Color::rgb(0, 0, 255));
    }

    #[test]
    fn high_byte_of_eight_digits_is_ignored() {
        assert_eq!(parse_color("ab102030").unwrap(), Color::rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn six_digit_hex_round_trips_case_insensitively() {
        let samples = [
            "000000", "ffffff", "FF0000", "00ff00", "0000Ff", "a1B2c3", "7f7f7f", "010203",
            "deadbe", "C0FFEE",
        ];
        for hex in samples {
            let color = parse_color(hex).unwrap();
            assert_eq!(color.to_hex(), hex.to_ascii_lowercase(), "round trip of {hex}");
        }
    }

    #[test]
    fn every_channel_value_round_trips() {
        for v in 0..=255u8 {
            let hex = format!("{v:02x}{:02x}{:02x}", 255 - v, v / 2);
            assert_eq!(parse_color(&hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn rejects_non_hex_input() {
        for bad in ["zzzzzz", "#ff0000", "0xff00", "+ff0000", "-1", "12 34", "ff00ég"] {
            assert!(
                matches!(parse_color(bad), Err(ColorParseError::InvalidDigit(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_color(""), Err(ColorParseError::Empty));
    }

    #[test]
    fn rejects_values_wider_than_32_bits() {
        assert!(matches!(
            parse_color("1ffffffff"),
            Err(ColorParseError::Overflow(_))
        ));
    }

    #[test]
    fn displays_with_leading_hash() {
        let c = parse_color("336699").unwrap();
        assert_eq!(c, Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(c.to_string(), "#336699");
    }

    #[test]
    fn converts_into_rgba_pixel() {
        let px: Rgba<u8> = Color::rgb(1, 2, 3).into();
        assert_eq!(px, Rgba([1, 2, 3, 255]));
    }
}
