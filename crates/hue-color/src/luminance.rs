// SPDX-License-Identifier: MIT
//
// Brightness measures.
//
// Two different notions of "how bright is this color" are in play:
//
//   - Relative luminance (WCAG 2.x): linearize each sRGB channel, then
//     weight by the Rec. 709 coefficients. This drives contrast ratios.
//
//   - Perceived brightness (ITU-R BT.601 luma on gamma-encoded values):
//     0.299 R + 0.587 G + 0.114 B on the 0–255 scale. Cheap, and good
//     enough to decide whether a label drawn over a swatch should be black
//     or white.
//
// The WCAG linearization threshold is 0.03928 (the value published in
// WCAG 2.0), not the 0.04045 of the sRGB standard. The two only disagree
// for channel value 10, and the published contrast numbers use 0.03928.

use crate::rgb::Rgb;

/// Default brightness cut-off above which overlay text is drawn black.
pub const DEFAULT_OVERLAY_THRESHOLD: f64 = 186.0;

/// The alternative cut-off of 191 on the perceived-brightness scale.
///
/// This is only the nominal figure of the older `R + G + B > 382` rule, not
/// an equivalent of it: that rule is unweighted (a channel mean above
/// 127.3), so `(0, 128, 255)` passes it with a luma of about 104.
pub const ALT_OVERLAY_THRESHOLD: f64 = 191.0;

/// Linearization threshold on the normalized channel value.
const WCAG_LINEAR_THRESHOLD: f64 = 0.039_28;

/// Gamma-encoded sRGB channel (0.0–1.0) to linear light, WCAG variant.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= WCAG_LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color per WCAG.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.to_unit();
    let r_lin = srgb_to_linear(r);
    let g_lin = srgb_to_linear(g);
    let b_lin = srgb_to_linear(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Perceived brightness on the 0–255 scale (BT.601 luma weights).
#[must_use]
pub fn perceived_brightness(color: Rgb) -> f64 {
    0.299f64.mul_add(
        f64::from(color.r),
        0.587f64.mul_add(f64::from(color.g), 0.114 * f64::from(color.b)),
    )
}

/// Which text color stays legible on top of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTone {
    Black,
    White,
}

impl TextTone {
    /// The tone as a concrete color.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::BLACK,
            Self::White => Rgb::WHITE,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Pick black text when the background is brighter than `threshold`,
/// white otherwise.
///
/// The threshold is a parameter rather than a constant because the
/// assistant has historically used two cut-offs
/// ([`DEFAULT_OVERLAY_THRESHOLD`] and [`ALT_OVERLAY_THRESHOLD`]).
#[must_use]
pub fn overlay_text(background: Rgb, threshold: f64) -> TextTone {
    if perceived_brightness(background) > threshold {
        TextTone::Black
    } else {
        TextTone::White
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance(Rgb::BLACK);
        assert!(approx_eq(lum, 0.0, 1e-9), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = relative_luminance(Rgb::WHITE);
        assert!(approx_eq(lum, 1.0, 1e-9), "White luminance: {lum}");
    }

    #[test]
    fn luminance_primaries_match_weights() {
        assert!(approx_eq(relative_luminance(Rgb::new(255, 0, 0)), 0.2126, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 255, 0)), 0.7152, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::new(0, 0, 255)), 0.0722, 1e-9));
    }

    #[test]
    fn luminance_mid_gray() {
        // sRGB 128 linearizes to ~0.2158
        let lum = relative_luminance(Rgb::new(128, 128, 128));
        assert!(approx_eq(lum, 0.2158, 0.001), "Mid-gray luminance: {lum}");
    }

    #[test]
    fn linear_segment_below_threshold() {
        // 10/255 = 0.0392 sits just under 0.03928 → linear branch.
        let c = 10.0 / 255.0;
        assert!(approx_eq(srgb_to_linear(c), c / 12.92, 1e-12));
    }

    #[test]
    fn luminance_is_monotonic_in_gray() {
        let mut prev = -1.0;
        for v in 0..=255u8 {
            let lum = relative_luminance(Rgb::new(v, v, v));
            assert!(lum > prev, "not increasing at {v}");
            prev = lum;
        }
    }

    // ── Perceived brightness ────────────────────────────────────────

    #[test]
    fn brightness_extremes() {
        assert!(approx_eq(perceived_brightness(Rgb::BLACK), 0.0, 1e-9));
        assert!(approx_eq(perceived_brightness(Rgb::WHITE), 255.0, 1e-9));
    }

    #[test]
    fn brightness_pure_red() {
        assert!(approx_eq(perceived_brightness(Rgb::new(255, 0, 0)), 76.245, 1e-9));
    }

    // ── Overlay text ────────────────────────────────────────────────

    #[test]
    fn overlay_on_white_is_black() {
        assert_eq!(overlay_text(Rgb::WHITE, DEFAULT_OVERLAY_THRESHOLD), TextTone::Black);
    }

    #[test]
    fn overlay_on_black_is_white() {
        assert_eq!(overlay_text(Rgb::BLACK, DEFAULT_OVERLAY_THRESHOLD), TextTone::White);
    }

    #[test]
    fn overlay_switches_around_threshold() {
        // The luma weights sum to 1, so a gray's brightness is its value.
        assert_eq!(overlay_text(Rgb::new(185, 185, 185), 186.0), TextTone::White);
        assert_eq!(overlay_text(Rgb::new(187, 187, 187), 186.0), TextTone::Black);
    }

    #[test]
    fn thresholds_disagree_between_186_and_191() {
        let gray = Rgb::new(188, 188, 188);
        assert_eq!(overlay_text(gray, DEFAULT_OVERLAY_THRESHOLD), TextTone::Black);
        assert_eq!(overlay_text(gray, ALT_OVERLAY_THRESHOLD), TextTone::White);
    }

    #[test]
    fn alt_threshold_is_not_the_channel_sum_rule() {
        let c = Rgb::new(0, 128, 255);
        assert!(u16::from(c.r) + u16::from(c.g) + u16::from(c.b) > 382);
        assert!(perceived_brightness(c) < ALT_OVERLAY_THRESHOLD);
        assert_eq!(overlay_text(c, ALT_OVERLAY_THRESHOLD), TextTone::White);
    }

    #[test]
    fn tone_names() {
        assert_eq!(TextTone::Black.name(), "black");
        assert_eq!(TextTone::White.rgb(), Rgb::WHITE);
    }
}
