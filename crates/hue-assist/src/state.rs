//! Application state owned by the assistant.

use std::path::PathBuf;

use hue_color::luminance::DEFAULT_OVERLAY_THRESHOLD;
use hue_color::{Rgb, TextTone, overlay_text};

use crate::hotkey::Shortcut;

/// Smallest sampling box edge, in pixels.
pub const MIN_AREA: u32 = 1;
/// Largest sampling box edge, in pixels.
pub const MAX_AREA: u32 = 50;
pub const DEFAULT_AREA: u32 = 10;

/// One tick's reading: the averaged color under the cursor and its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub rgb: Rgb,
    pub name: String,
    pub hex: String,
}

impl Sample {
    #[must_use]
    pub fn new(rgb: Rgb, name: impl Into<String>) -> Self {
        Self {
            rgb,
            name: name.into(),
            hex: rgb.to_hex(),
        }
    }

    /// Tooltip text: the name, optionally followed by ` | #rrggbb`.
    #[must_use]
    pub fn label(&self, show_hex: bool) -> String {
        if show_hex {
            format!("{} | {}", self.name, self.hex)
        } else {
            self.name.clone()
        }
    }

    /// Text tone that stays legible on a swatch of this color.
    #[must_use]
    pub fn text_tone(&self, threshold: f64) -> TextTone {
        overlay_text(self.rgb, threshold)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Where saved colors go. `None` until the user picks a file.
    pub destination: Option<PathBuf>,
    /// The active global shortcut.
    pub shortcut: Option<Shortcut>,
    pub last_sample: Option<Sample>,
    area: u32,
    pub show_hex: bool,
    overlay_threshold: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            destination: None,
            shortcut: None,
            last_sample: None,
            area: DEFAULT_AREA,
            show_hex: false,
            overlay_threshold: DEFAULT_OVERLAY_THRESHOLD,
        }
    }
}

impl AppState {
    /// Sampling box edge in pixels, always within `MIN_AREA..=MAX_AREA`.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.area
    }

    /// Set the sampling area, clamped. Returns the value actually stored.
    pub fn set_area(&mut self, area: u32) -> u32 {
        self.area = area.clamp(MIN_AREA, MAX_AREA);
        self.area
    }

    /// Overlay text threshold on the perceived-brightness scale, `0..=255`.
    #[must_use]
    pub const fn overlay_threshold(&self) -> f64 {
        self.overlay_threshold
    }

    /// Set the overlay threshold, clamped to `0..=255`. NaN is ignored.
    /// Returns the value actually stored.
    pub fn set_overlay_threshold(&mut self, threshold: f64) -> f64 {
        if !threshold.is_nan() {
            self.overlay_threshold = threshold.clamp(0.0, 255.0);
        }
        self.overlay_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn label_with_and_without_hex() {
        let sample = Sample::new(Rgb::new(255, 99, 71), "tomato");
        assert_eq!(sample.label(false), "tomato");
        assert_eq!(sample.label(true), "tomato | #ff6347");
    }

    #[test]
    fn text_tone_follows_threshold() {
        let sample = Sample::new(Rgb::new(188, 188, 188), "silver");
        assert_eq!(sample.text_tone(186.0), TextTone::Black);
        assert_eq!(sample.text_tone(191.0), TextTone::White);
    }

    #[test]
    fn area_is_clamped() {
        let mut state = AppState::default();
        assert_eq!(state.area(), DEFAULT_AREA);
        assert_eq!(state.set_area(0), MIN_AREA);
        assert_eq!(state.set_area(500), MAX_AREA);
        assert_eq!(state.set_area(25), 25);
    }

    #[test]
    fn defaults() {
        let state = AppState::default();
        assert_eq!(state.destination, None);
        assert_eq!(state.shortcut, None);
        assert!(!state.show_hex);
        assert_eq!(state.overlay_threshold(), DEFAULT_OVERLAY_THRESHOLD);
    }

    #[test]
    fn overlay_threshold_is_clamped() {
        let mut state = AppState::default();
        assert_eq!(state.set_overlay_threshold(-4.0), 0.0);
        assert_eq!(state.set_overlay_threshold(1e9), 255.0);
        assert_eq!(state.set_overlay_threshold(191.0), 191.0);
        assert_eq!(state.set_overlay_threshold(f64::NAN), 191.0);
    }
}
