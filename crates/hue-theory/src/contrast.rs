//! WCAG contrast ratio and legibility rating.
//!
//! The ratio between two colors is
//!
//!   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
//!
//! where L is the relative luminance from [`hue_color::relative_luminance`].
//! It ranges from 1:1 (identical colors) to 21:1 (black on white).
//!
//! Ratings use the WCAG 2.x success criteria thresholds, lower bound
//! inclusive:
//!
//! | Ratio          | Rating                    |
//! |----------------|---------------------------|
//! | >= 7.0         | `AAA`                     |
//! | 4.5 ..< 7.0    | `AA`                      |
//! | 3.0 ..< 4.5    | `AA Large Text (minimum)` |
//! | < 3.0          | `Fail`                    |
//!
//! Ratings are computed from the ratio rounded to two decimals, which is
//! also what the user sees. A raw ratio of 4.4996 displays as 4.5 and rates
//! `AA`, so the number and the verdict never disagree.

use std::fmt;

use hue_color::{Rgb, relative_luminance};

/// Rounding factor for displayed ratios (two decimals).
const ROUNDING_FACTOR: f64 = 100.0;

/// Unrounded WCAG contrast ratio. Always in [1.0, 21.0], symmetric.
#[must_use]
pub fn contrast_ratio_raw(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG contrast ratio rounded to two decimal places.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    (contrast_ratio_raw(a, b) * ROUNDING_FACTOR).round() / ROUNDING_FACTOR
}

// ---------------------------------------------------------------------------
// ContrastRating
// ---------------------------------------------------------------------------

/// WCAG conformance level reached by a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContrastRating {
    /// Below 3:1 — not legible enough for any text.
    Fail,
    /// 3:1 — acceptable for large text only.
    AaLarge,
    /// 4.5:1 — normal text, level AA.
    Aa,
    /// 7:1 — normal text, level AAA.
    Aaa,
}

impl ContrastRating {
    /// Classify a ratio. Each band includes its lower bound.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    /// The rating label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::AaLarge => "AA Large Text (minimum)",
            Self::Fail => "Fail",
        }
    }

    /// One-word verdict shown next to the label.
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Aaa => "Excellent",
            Self::Aa => "Good",
            Self::AaLarge => "Minimum",
            Self::Fail => "Low contrast",
        }
    }

    /// Whether the pair is usable for at least large text.
    #[must_use]
    pub const fn passed(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

impl fmt::Display for ContrastRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ContrastResult
// ---------------------------------------------------------------------------

/// A contrast ratio together with its rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastResult {
    /// Ratio rounded to two decimals, in [1.0, 21.0].
    pub ratio: f64,
    pub rating: ContrastRating,
}

impl ContrastResult {
    #[must_use]
    pub fn between(a: Rgb, b: Rgb) -> Self {
        let ratio = contrast_ratio(a, b);
        Self {
            ratio,
            rating: ContrastRating::from_ratio(ratio),
        }
    }
}

impl fmt::Display for ContrastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:1 — {} ({})", self.ratio, self.rating, self.rating.verdict())
    }
}

/// Check two hex color codes against each other.
///
/// # Errors
///
/// Returns [`TheoryError::Color`](crate::TheoryError::Color) if either input
/// is not a valid `#rrggbb` code.
pub fn check_contrast(hex_a: &str, hex_b: &str) -> crate::Result<ContrastResult> {
    let a = Rgb::from_hex(hex_a)?;
    let b = Rgb::from_hex(hex_b)?;
    Ok(ContrastResult::between(a, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
