// SPDX-License-Identifier: MIT
//
// 8-bit sRGB triples and their `#rrggbb` text form.
//
// Decoding is strict: after trimming surrounding whitespace and one optional
// leading `#`, exactly six hexadecimal digits must remain. Shorthand (`#fff`)
// and alpha (`#rrggbbaa`) forms are rejected.
//
// Encoding always produces lowercase with a leading `#`, so a round trip
// normalizes case and restores a missing `#`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// The accepted shape of a hex color code.
static HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?[0-9a-fA-F]{6}$").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Errors produced while decoding color input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not a six-digit hex color code. Carries the raw input.
    #[error("invalid hex color format: {0:?} (expected #rrggbb)")]
    InvalidColorFormat(String),
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque sRGB color with 8 bits per channel.
///
/// `Display` renders the triple the way the assistant writes it into record
/// files: `(r, g, b)`. Use [`to_hex`](Self::to_hex) for the `#rrggbb` form.
///
/// # Examples
///
/// ```
/// use hue_color::Rgb;
///
/// let blue = Rgb::from_hex("#3498DB").unwrap();
/// assert_eq!(blue, Rgb::new(52, 152, 219));
/// assert_eq!(blue.to_hex(), "#3498db");
/// assert_eq!(blue.to_string(), "(52, 152, 219)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a hex color code (`#rrggbb` or `rrggbb`, any case).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] for empty input, the wrong
    /// number of digits, or any non-hexadecimal character.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let trimmed = s.trim();
        if !HEX_PATTERN.is_match(trimmed) {
            return Err(ColorError::InvalidColorFormat(s.to_string()));
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed).as_bytes();
        Ok(Self {
            r: parse_hex_byte(&digits[0..2]),
            g: parse_hex_byte(&digits[2..4]),
            b: parse_hex_byte(&digits[4..6]),
        })
    }

    /// Encode as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let Self { r, g, b } = self;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Channels normalized to 0.0–1.0.
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Build from unit-range channels, rounding to the nearest 8-bit value.
    ///
    /// Out-of-range inputs are clamped.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
        }
    }

    /// Squared Euclidean distance in 8-bit RGB space.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db).unsigned_abs()
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

#[inline]
const fn parse_hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// Two validated hex digits to a byte.
#[inline]
fn parse_hex_byte(bytes: &[u8]) -> u8 {
    parse_hex_digit(bytes[0]) << 4 | parse_hex_digit(bytes[1])
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_with_hash() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
    }

    #[test]
    fn decode_without_hash() {
        assert_eq!(Rgb::from_hex("0a0B0c").unwrap(), Rgb::new(10, 11, 12));
    }

    #[test]
    fn decode_trims_whitespace() {
        assert_eq!(Rgb::from_hex("  #FFFFFF \n").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn round_trip_normalizes_case_and_prefix() {
        for input in ["#3498DB", "3498db", "#AbCdEf", "000000", "#ffffff"] {
            let hex = Rgb::from_hex(input).unwrap().to_hex();
            let expected = format!("#{}", input.trim_start_matches('#').to_lowercase());
            assert_eq!(hex, expected, "input {input}");
        }
    }

    #[test]
    fn reject_empty() {
        assert!(matches!(Rgb::from_hex(""), Err(ColorError::InvalidColorFormat(_))));
        assert!(Rgb::from_hex("#").is_err());
        assert!(Rgb::from_hex("   ").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        for input in ["#fff", "#ffff", "#fffff", "#fffffff", "#ff00ff00", "12345"] {
            assert!(Rgb::from_hex(input).is_err(), "accepted {input}");
        }
    }

    #[test]
    fn reject_non_hex_characters() {
        for input in ["#gg0000", "#12345z", "zzzzzz", "#12 456", "##12345"] {
            assert!(Rgb::from_hex(input).is_err(), "accepted {input}");
        }
    }

    #[test]
    fn error_carries_raw_input() {
        let err = Rgb::from_hex("#xyz").unwrap_err();
        assert_eq!(err, ColorError::InvalidColorFormat("#xyz".to_string()));
        assert!(err.to_string().contains("#xyz"));
    }

    #[test]
    fn parse_via_from_str() {
        let c: Rgb = "#00ff7f".parse().unwrap();
        assert_eq!(c, Rgb::new(0, 255, 127));
    }

    #[test]
    fn display_matches_tuple_form() {
        assert_eq!(Rgb::new(1, 22, 255).to_string(), "(1, 22, 255)");
    }

    #[test]
    fn unit_round_trip_is_exact() {
        for v in [0u8, 1, 52, 127, 128, 200, 254, 255] {
            let c = Rgb::new(v, v, v);
            let (r, g, b) = c.to_unit();
            assert_eq!(Rgb::from_unit(r, g, b), c);
        }
    }

    #[test]
    fn from_unit_clamps() {
        assert_eq!(Rgb::from_unit(-0.5, 1.5, 0.5), Rgb::new(0, 255, 128));
    }

    #[test]
    fn distance_squared() {
        assert_eq!(Rgb::new(1, 2, 3).distance_sq(Rgb::BLACK), 14);
        assert_eq!(Rgb::WHITE.distance_sq(Rgb::WHITE), 0);
        assert_eq!(Rgb::BLACK.distance_sq(Rgb::WHITE), 3 * 255 * 255);
    }
}
