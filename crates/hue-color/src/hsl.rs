// SPDX-License-Identifier: MIT
//
// RGB ↔ HSL conversion with hue measured in turns.
//
// Hue is a fraction of a full turn in [0, 1) rather than degrees, because
// harmony offsets are specified in turns (0.5 = complement, 1/3 = triad).
// The conversion is the classic hexcone HLS model: lightness is the
// midpoint of the largest and smallest channel, saturation is the spread
// relative to the distance from the nearest extreme.

use crate::rgb::Rgb;

/// A color in HSL space. All components in [0, 1]; hue wraps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue as a fraction of a full turn, in [0.0, 1.0).
    pub h: f64,
    /// Saturation, 0.0 (gray) to 1.0 (fully saturated).
    pub s: f64,
    /// Lightness, 0.0 (black) to 1.0 (white).
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert an 8-bit color to HSL.
    ///
    /// Achromatic colors (all channels equal) get hue 0 and saturation 0.
    #[must_use]
    pub fn from_rgb(color: Rgb) -> Self {
        let (r, g, b) = color.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;

        if color.r == color.g && color.g == color.b {
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;

        let h = if r >= max {
            bc - gc
        } else if g >= max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self { h: (h / 6.0).rem_euclid(1.0), s, l }
    }

    /// Convert back to an 8-bit color, rounding each channel.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let Self { h, s, l } = self;
        if s == 0.0 {
            return Rgb::from_unit(l, l, l);
        }

        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0f64.mul_add(l, -m2);

        Rgb::from_unit(
            hue_channel(m1, m2, h + 1.0 / 3.0),
            hue_channel(m1, m2, h),
            hue_channel(m1, m2, h - 1.0 / 3.0),
        )
    }

    /// Rotate the hue by `turns`, wrapping modulo one full turn.
    /// Saturation and lightness are untouched.
    #[must_use]
    pub fn rotate(self, turns: f64) -> Self {
        Self {
            h: (self.h + turns).rem_euclid(1.0),
            ..self
        }
    }
}

impl From<Rgb> for Hsl {
    fn from(color: Rgb) -> Self {
        Self::from_rgb(color)
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

/// One channel of the piecewise-linear hue ramp.
fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        ((m2 - m1) * hue).mul_add(6.0, m1)
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        ((m2 - m1) * (2.0 / 3.0 - hue)).mul_add(6.0, m1)
    } else {
        m1
    }
}

/// Shortest distance between two hues on the unit circle, in turns.
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
