//! Harmony palettes — hue rotation around the color wheel.
//!
//! Each harmony kind is a fixed list of hue offsets, measured in turns. A
//! palette is built by converting the base color to HSL, adding each offset
//! to the hue (wrapping modulo one turn), holding saturation and lightness,
//! and converting back. An offset of zero always reproduces the base color
//! exactly, so every palette that contains one starts from the picked color.

use hue_color::{Hsl, Rgb};

/// The harmony rules offered by the palette generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonyKind {
    /// Base and its opposite (2 colors).
    Complementary,
    /// Two neighbours either side of the base (5 colors).
    Analogous,
    /// 120-degree spacing (3 colors).
    Triadic,
    /// 90-degree spacing (4 colors).
    Tetradic,
    /// Base plus the two hues flanking its complement (3 colors).
    SplitComplementary,
}

impl HarmonyKind {
    /// Hue offsets in turns, in palette order.
    #[must_use]
    pub const fn offsets(self) -> &'static [f64] {
        match self {
            Self::Complementary => &[0.0, 0.5],
            Self::Analogous => &[-0.08, -0.04, 0.0, 0.04, 0.08],
            Self::Triadic => &[0.0, 1.0 / 3.0, 2.0 / 3.0],
            Self::Tetradic => &[0.0, 0.25, 0.5, 0.75],
            Self::SplitComplementary => &[0.0, 0.42, 0.58],
        }
    }

    /// Display name, as shown in the harmony selector.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "Complementary",
            Self::Analogous => "Analogous",
            Self::Triadic => "Triadic",
            Self::Tetradic => "Tetradic",
            Self::SplitComplementary => "Split Complementary",
        }
    }

    /// Parse a harmony kind from its display name (case-insensitive).
    ///
    /// `split-complementary` and `split_complementary` are accepted too.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Self::all()
            .iter()
            .find(|k| normalize_name(k.name()) == wanted)
            .copied()
    }

    /// All harmony kinds, in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary,
            Self::Analogous,
            Self::Triadic,
            Self::Tetradic,
            Self::SplitComplementary,
        ]
    }
}

/// Lowercase, with runs of space, `-` and `_` collapsed to one space.
fn normalize_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the palette for `base` under `kind`.
#[must_use]
pub fn harmony_colors(base: Rgb, kind: HarmonyKind) -> Vec<Rgb> {
    let hsl = Hsl::from_rgb(base);
    kind.offsets()
        .iter()
        .map(|&offset| {
            if offset == 0.0 {
                base
            } else {
                hsl.rotate(offset).to_rgb()
            }
        })
        .collect()
}

/// String-level palette generation: hex in, hex out.
///
/// An unrecognized harmony name yields a single-element palette holding the
/// normalized base color.
///
/// # Errors
///
/// Returns [`TheoryError::Color`](crate::TheoryError::Color) if `base_hex` is
/// not a valid `#rrggbb` code.
pub fn harmony_hex(base_hex: &str, type_name: &str) -> crate::Result<Vec<String>> {
    let base = Rgb::from_hex(base_hex)?;
    let palette = HarmonyKind::from_name(type_name)
        .map_or_else(|| vec![base], |kind| harmony_colors(base, kind));
    Ok(palette.into_iter().map(Rgb::to_hex).collect())
}

/// Caption for the swatch at `index`: the first card is the picked color.
#[must_use]
pub fn swatch_label(index: usize) -> String {
    if index == 0 {
        "Main".to_string()
    } else {
        format!("Color {index}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
