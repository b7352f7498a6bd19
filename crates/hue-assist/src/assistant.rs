//! The assistant: owned state plus the capabilities it drives.
//!
//! # Tick
//!
//! A front end calls [`Assistant::tick`] on a timer (about every 200 ms):
//!
//! 1. read the cursor position
//! 2. grab the sampling box around it and average the pixels
//! 3. name the average and store it as the current [`Sample`]
//! 4. drain hotkey presses; each press of the active shortcut saves the
//!    current sample
//!
//! A failed capture keeps the previous sample and is reported in the
//! returned [`Tick`]; it never stops the loop.
//!
//! # Shortcut changes
//!
//! [`Assistant::set_shortcut`] registers the new chord before releasing the
//! old one, so a chord the system refuses leaves the previous shortcut
//! working.

use std::path::{Path, PathBuf};

use hue_color::Rgb;
use hue_color::luminance::DEFAULT_OVERLAY_THRESHOLD;
use hue_theory::{ContrastResult, HarmonyKind, NameTable, harmony_colors};

use crate::capture::{
    CaptureError, CursorPositionSource, Point, Region, ScreenSampler, average_color,
};
use crate::error::{AssistError, Result};
use crate::hotkey::{GlobalHotkeyRegistry, Shortcut, ShortcutError};
use crate::record::{ColorLog, SavedColorRecord};
use crate::settings::Settings;
use crate::state::{AppState, DEFAULT_AREA, Sample};

/// What happened during one [`Assistant::tick`].
#[derive(Debug, Default)]
pub struct Tick {
    /// The sample differs from the previous tick's.
    pub changed: bool,
    /// Set when this tick's capture failed.
    pub capture_error: Option<AssistError>,
    /// One entry per shortcut press: the toast message or the save error.
    pub saves: Vec<Result<String>>,
}

pub struct Assistant<P, S, H> {
    state: AppState,
    names: NameTable,
    cursor: P,
    sampler: S,
    hotkeys: H,
    settings_path: Option<PathBuf>,
}

impl<P, S, H> Assistant<P, S, H>
where
    P: CursorPositionSource,
    S: ScreenSampler,
    H: GlobalHotkeyRegistry,
{
    #[must_use]
    pub fn new(names: NameTable, cursor: P, sampler: S, hotkeys: H) -> Self {
        Self {
            state: AppState::default(),
            names,
            cursor,
            sampler,
            hotkeys,
            settings_path: None,
        }
    }

    /// Persist settings to `path` whenever a persisted value changes.
    #[must_use]
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn names(&self) -> &NameTable {
        &self.names
    }

    /// Where the cursor is now.
    #[must_use]
    pub fn cursor_position(&self) -> Point {
        self.cursor.position()
    }

    pub const fn cursor_mut(&mut self) -> &mut P {
        &mut self.cursor
    }

    pub const fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }

    pub const fn hotkeys_mut(&mut self) -> &mut H {
        &mut self.hotkeys
    }

    // ── Sampling ────────────────────────────────────────────────────

    /// Sample the color under the cursor, store it, and report whether it
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::CaptureFailed`] if the grab fails or yields no
    /// pixels. The previous sample is kept.
    pub fn sample(&mut self) -> Result<bool> {
        let point = self.cursor.position();
        let region = Region::around(point, self.state.area());
        let pixels = self.sampler.grab(region)?;
        let rgb = average_color(&pixels).ok_or(CaptureError::Empty)?;

        let sample = Sample::new(rgb, self.names.nearest(rgb));
        let changed = self.state.last_sample.as_ref() != Some(&sample);
        if changed {
            tracing::trace!(x = point.x, y = point.y, name = %sample.name, hex = %sample.hex, "sample");
        }
        self.state.last_sample = Some(sample);
        Ok(changed)
    }

    /// One timer step: sample, then handle pending shortcut presses.
    pub fn tick(&mut self) -> Tick {
        let mut tick = Tick::default();
        match self.sample() {
            Ok(changed) => tick.changed = changed,
            Err(e) => {
                tracing::debug!(error = %e, "capture failed");
                tick.capture_error = Some(e);
            }
        }

        tick.saves = self.handle_hotkeys();
        tick
    }

    /// Drain pending shortcut presses, saving once per press of the active
    /// shortcut.
    pub fn handle_hotkeys(&mut self) -> Vec<Result<String>> {
        let active = self.state.shortcut;
        self.hotkeys
            .take_triggered()
            .into_iter()
            .filter(|&pressed| active == Some(pressed))
            .map(|_| self.save_current())
            .collect()
    }

    // ── Saving ──────────────────────────────────────────────────────

    pub fn set_destination(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::info!(path = %path.display(), "destination selected");
        self.state.destination = Some(path);
    }

    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        self.state.destination.as_deref()
    }

    /// Append the current sample to the destination file.
    ///
    /// Returns the confirmation message, `"<name> saved!"`.
    ///
    /// # Errors
    ///
    /// [`AssistError::NoDestinationSelected`] without a destination,
    /// [`AssistError::NoColorSampled`] before the first sample, and
    /// [`AssistError::FileWriteFailed`] if the append fails.
    pub fn save_current(&self) -> Result<String> {
        let path = self.state.destination.as_ref().ok_or(AssistError::NoDestinationSelected)?;
        let sample = self.state.last_sample.as_ref().ok_or(AssistError::NoColorSampled)?;

        let record = SavedColorRecord::from(sample);
        ColorLog::new(path).append(&record)?;
        Ok(format!("{} saved!", record.name))
    }

    // ── Shortcut ────────────────────────────────────────────────────

    /// Parse and register `text` as the save shortcut.
    ///
    /// On success the previous shortcut is released and settings are
    /// persisted (a persist failure is only logged).
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::ShortcutRegistrationFailed`] if `text` does
    /// not parse or the registry refuses it. The previous shortcut stays
    /// active.
    pub fn set_shortcut(&mut self, text: &str) -> Result<String> {
        let shortcut = self.register(text)?;
        self.activate(shortcut);
        tracing::info!(shortcut = %shortcut, "shortcut set");
        self.persist();
        Ok(format!("Shortcut '{shortcut}' set!"))
    }

    /// Parse `text` and register it, unless it is already the active chord.
    fn register(&mut self, text: &str) -> Result<Shortcut> {
        let failed = |reason: String| {
            tracing::warn!(shortcut = text, %reason, "shortcut rejected");
            AssistError::ShortcutRegistrationFailed {
                shortcut: text.trim().to_string(),
                reason,
            }
        };

        let shortcut: Shortcut = text.parse().map_err(|e: ShortcutError| failed(e.to_string()))?;
        if self.state.shortcut != Some(shortcut) {
            self.hotkeys.register(shortcut).map_err(|e| failed(e.to_string()))?;
        }
        Ok(shortcut)
    }

    /// Make `shortcut` the active chord, releasing the previous one.
    fn activate(&mut self, shortcut: Shortcut) {
        if let Some(old) = self.state.shortcut.replace(shortcut) {
            if old != shortcut {
                self.hotkeys.unregister(old);
            }
        }
    }

    /// Apply settings loaded at startup.
    ///
    /// Threshold and area are applied first. Returns a message when a
    /// shortcut was restored.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::ShortcutRegistrationFailed`] when the saved
    /// shortcut cannot be registered. The other settings are still applied.
    pub fn restore_settings(&mut self, settings: &Settings) -> Result<Option<String>> {
        if let Some(threshold) = settings.overlay_threshold {
            self.state.set_overlay_threshold(threshold);
        }
        if let Some(area) = settings.sample_area {
            self.state.set_area(area);
        }

        let Some(text) = settings.shortcut.as_deref() else {
            return Ok(None);
        };
        let shortcut = self.register(text)?;
        self.activate(shortcut);
        tracing::info!(shortcut = %shortcut, "shortcut restored");
        Ok(Some(format!("Shortcut '{shortcut}' loaded")))
    }

    /// The settings that would be persisted right now. Threshold and area
    /// are included only when they differ from their defaults.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let threshold = self.state.overlay_threshold();
        let area = self.state.area();
        Settings {
            shortcut: self.state.shortcut.map(|s| s.to_string()),
            overlay_threshold: ((threshold - DEFAULT_OVERLAY_THRESHOLD).abs() > f64::EPSILON)
                .then_some(threshold),
            sample_area: (area != DEFAULT_AREA).then_some(area),
        }
    }

    fn persist(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings().save(path) {
            tracing::warn!(error = %e, "settings not persisted");
        }
    }

    // ── Options ─────────────────────────────────────────────────────

    /// Set the sampling area (clamped to 1..=50). Returns the stored value.
    pub fn set_area(&mut self, area: u32) -> u32 {
        let stored = self.state.set_area(area);
        self.persist();
        stored
    }

    pub const fn set_show_hex(&mut self, show: bool) {
        self.state.show_hex = show;
    }

    /// Set the overlay text brightness threshold (0..=255).
    pub fn set_overlay_threshold(&mut self, threshold: f64) -> f64 {
        let stored = self.state.set_overlay_threshold(threshold);
        self.persist();
        stored
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Resolve user input to a color: `#rrggbb`, a CSS3 name, or `.` for
    /// the current sample.
    ///
    /// # Errors
    ///
    /// [`AssistError::NoColorSampled`] for `.` before the first sample,
    /// [`AssistError::InvalidColorFormat`] for anything else unrecognized.
    pub fn resolve_color(&self, text: &str) -> Result<Rgb> {
        let text = text.trim();
        if text == "." {
            return self
                .state
                .last_sample
                .as_ref()
                .map(|s| s.rgb)
                .ok_or(AssistError::NoColorSampled);
        }
        match Rgb::from_hex(text) {
            Ok(rgb) => Ok(rgb),
            Err(e) => self.names.lookup(text).ok_or(AssistError::InvalidColorFormat(e)),
        }
    }

    /// WCAG contrast between two colors given as user input.
    ///
    /// # Errors
    ///
    /// See [`resolve_color`](Self::resolve_color).
    pub fn check_contrast(&self, a: &str, b: &str) -> Result<ContrastResult> {
        Ok(ContrastResult::between(self.resolve_color(a)?, self.resolve_color(b)?))
    }

    /// Harmony palette for `base`. An unknown kind gives just the base.
    ///
    /// # Errors
    ///
    /// See [`resolve_color`](Self::resolve_color).
    pub fn harmony(&self, base: &str, kind: &str) -> Result<Vec<Rgb>> {
        let base = self.resolve_color(base)?;
        Ok(HarmonyKind::from_name(kind).map_or_else(|| vec![base], |k| harmony_colors(base, k)))
    }

    /// Nearest CSS3 name of a color given as user input.
    ///
    /// # Errors
    ///
    /// See [`resolve_color`](Self::resolve_color).
    pub fn name_of(&self, text: &str) -> Result<&'static str> {
        Ok(self.names.nearest(self.resolve_color(text)?))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Canvas, FixedCursor};
    use crate::hotkey::{HotkeyError, MemoryHotkeys};
    use crate::record::RecordFormat;
    use hue_theory::ContrastRating;
    use pretty_assertions::assert_eq;
    use std::fs;

    type TestAssistant = Assistant<FixedCursor, Canvas, MemoryHotkeys>;

    const TOMATO: Rgb = Rgb::new(255, 99, 71);

    fn assistant() -> TestAssistant {
        let mut canvas = Canvas::new(100, 100, Rgb::WHITE);
        canvas.fill(Region { left: 0, top: 0, right: 50, bottom: 100 }, TOMATO);
        Assistant::new(
            NameTable::css3().clone(),
            FixedCursor::new(Point::new(20, 20)),
            canvas,
            MemoryHotkeys::new(),
        )
    }

    fn sc(s: &str) -> Shortcut {
        s.parse().unwrap()
    }

    // ── Sampling ────────────────────────────────────────────────────

    #[test]
    fn tick_samples_and_names() {
        let mut a = assistant();
        let tick = a.tick();
        assert!(tick.changed);
        assert!(tick.capture_error.is_none());
        let sample = a.state().last_sample.clone().unwrap();
        assert_eq!(sample, Sample::new(TOMATO, "tomato"));
    }

    #[test]
    fn unchanged_sample_is_not_reported() {
        let mut a = assistant();
        assert!(a.tick().changed);
        assert!(!a.tick().changed);
        a.cursor_mut().move_to(Point::new(80, 20));
        assert!(a.tick().changed);
        assert_eq!(a.state().last_sample.as_ref().unwrap().name, "white");
    }

    #[test]
    fn capture_failure_keeps_last_sample() {
        let mut a = assistant();
        a.tick();
        a.cursor_mut().move_to(Point::new(-500, -500));
        let tick = a.tick();
        assert!(matches!(tick.capture_error, Some(AssistError::CaptureFailed(_))));
        assert_eq!(a.state().last_sample.as_ref().unwrap().rgb, TOMATO);
    }

    #[test]
    fn area_straddling_edge_averages() {
        let mut a = assistant();
        a.cursor_mut().move_to(Point::new(50, 50));
        a.set_area(10);
        a.tick();
        // Half tomato, half white.
        let rgb = a.state().last_sample.as_ref().unwrap().rgb;
        assert_eq!(rgb, Rgb::new(255, 177, 163));
    }

    // ── Saving ──────────────────────────────────────────────────────

    #[test]
    fn save_without_destination() {
        let mut a = assistant();
        a.tick();
        assert!(matches!(a.save_current(), Err(AssistError::NoDestinationSelected)));
    }

    #[test]
    fn save_without_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.csv");
        let mut a = assistant();
        a.set_destination(&path);
        assert!(matches!(a.save_current(), Err(AssistError::NoColorSampled)));
        assert!(!path.exists());
    }

    #[test]
    fn save_appends_and_toasts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.csv");
        let mut a = assistant();
        a.set_destination(&path);
        a.tick();
        assert_eq!(a.save_current().unwrap(), "tomato saved!");
        assert_eq!(a.destination(), Some(path.as_path()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            SavedColorRecord::new("tomato", TOMATO).render(RecordFormat::Csv)
        );
    }

    #[test]
    fn shortcut_press_saves_on_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.txt");
        let mut a = assistant();
        a.set_destination(&path);
        a.set_shortcut("ctrl+shift+s").unwrap();

        a.hotkeys_mut().press(sc("ctrl+shift+s"));
        let tick = a.tick();
        assert_eq!(tick.saves.len(), 1);
        assert_eq!(tick.saves[0].as_ref().unwrap(), "tomato saved!");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "tomato | RGB: (255, 99, 71) | HEX: #ff6347\n"
        );
    }

    // ── Shortcut ────────────────────────────────────────────────────

    #[test]
    fn set_shortcut_replaces_previous() {
        let mut a = assistant();
        assert_eq!(a.set_shortcut("Ctrl+Shift+S").unwrap(), "Shortcut 'ctrl+shift+s' set!");
        a.set_shortcut("alt+c").unwrap();
        assert_eq!(a.state().shortcut, Some(sc("alt+c")));
        assert!(!a.hotkeys_mut().is_registered(sc("ctrl+shift+s")));
        assert!(a.hotkeys_mut().is_registered(sc("alt+c")));
    }

    #[test]
    fn setting_same_shortcut_twice_is_fine() {
        let mut a = assistant();
        a.set_shortcut("ctrl+s").unwrap();
        a.set_shortcut("control+S").unwrap();
        assert!(a.hotkeys_mut().is_registered(sc("ctrl+s")));
    }

    #[test]
    fn failed_registration_keeps_previous() {
        let mut a = assistant();
        a.set_shortcut("ctrl+shift+s").unwrap();
        a.hotkeys_mut().reserve(sc("ctrl+alt+delete"));

        let err = a.set_shortcut("ctrl+alt+delete").unwrap_err();
        assert!(matches!(err, AssistError::ShortcutRegistrationFailed { .. }));
        assert_eq!(a.state().shortcut, Some(sc("ctrl+shift+s")));
        assert!(a.hotkeys_mut().is_registered(sc("ctrl+shift+s")));
    }

    #[test]
    fn malformed_shortcut_keeps_previous() {
        let mut a = assistant();
        a.set_shortcut("f9").unwrap();
        let err = a.set_shortcut("ctrl+").unwrap_err();
        match err {
            AssistError::ShortcutRegistrationFailed { shortcut, .. } => assert_eq!(shortcut, "ctrl+"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state().shortcut, Some(sc("f9")));
    }

    #[test]
    fn shortcut_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut a = assistant().with_settings_path(&path);
        a.set_shortcut("ctrl+shift+c").unwrap();
        assert_eq!(Settings::load(&path).shortcut.as_deref(), Some("ctrl+shift+c"));
    }

    #[test]
    fn persisted_file_holds_only_changed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let read = || -> serde_json::Value { serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap() };
        let mut a = assistant().with_settings_path(&path);

        a.set_area(DEFAULT_AREA);
        assert_eq!(read(), serde_json::json!({}));

        a.set_shortcut("ctrl+shift+c").unwrap();
        assert_eq!(read(), serde_json::json!({ "shortcut": "ctrl+shift+c" }));

        a.set_area(20);
        assert_eq!(read(), serde_json::json!({ "shortcut": "ctrl+shift+c", "sample_area": 20 }));

        a.set_area(DEFAULT_AREA);
        assert_eq!(read(), serde_json::json!({ "shortcut": "ctrl+shift+c" }));
    }

    #[test]
    fn persist_failure_does_not_fail_set_shortcut() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = assistant().with_settings_path(dir.path().join("missing").join("settings.json"));
        assert!(a.set_shortcut("ctrl+k").is_ok());
    }

    #[test]
    fn restore_settings_applies_everything() {
        let mut a = assistant();
        let settings = Settings {
            shortcut: Some("ctrl+shift+s".into()),
            overlay_threshold: Some(191.0),
            sample_area: Some(80),
        };
        let msg = a.restore_settings(&settings).unwrap();
        assert_eq!(msg.as_deref(), Some("Shortcut 'ctrl+shift+s' loaded"));
        assert_eq!(a.state().overlay_threshold(), 191.0);
        assert_eq!(a.state().area(), 50);
        assert!(a.hotkeys_mut().is_registered(sc("ctrl+shift+s")));
    }

    #[test]
    fn restore_settings_clamps_threshold() {
        let mut a = assistant();
        let mut settings = Settings { overlay_threshold: Some(900.0), ..Settings::default() };
        a.restore_settings(&settings).unwrap();
        assert_eq!(a.state().overlay_threshold(), 255.0);

        settings.overlay_threshold = Some(-20.0);
        a.restore_settings(&settings).unwrap();
        assert_eq!(a.state().overlay_threshold(), 0.0);
    }

    #[test]
    fn restore_with_taken_shortcut_reports_error() {
        let mut a = assistant();
        a.hotkeys_mut().reserve(sc("ctrl+s"));
        let settings = Settings {
            shortcut: Some("ctrl+s".into()),
            overlay_threshold: None,
            sample_area: Some(4),
        };
        assert!(a.restore_settings(&settings).is_err());
        assert_eq!(a.state().shortcut, None);
        assert_eq!(a.state().area(), 4);
    }

    #[test]
    fn hotkey_error_reason_is_kept() {
        let mut a = assistant();
        a.hotkeys_mut().reserve(sc("f1"));
        let err = a.set_shortcut("f1").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("cannot set shortcut \"f1\": {}", HotkeyError::Reserved(sc("f1")))
        );
    }

    // ── Analysis ────────────────────────────────────────────────────

    #[test]
    fn resolve_hex_name_and_current() {
        let mut a = assistant();
        assert_eq!(a.resolve_color("#FF6347").unwrap(), TOMATO);
        assert_eq!(a.resolve_color("Tomato").unwrap(), TOMATO);
        assert!(matches!(a.resolve_color("."), Err(AssistError::NoColorSampled)));
        a.tick();
        assert_eq!(a.resolve_color(".").unwrap(), TOMATO);
        assert!(matches!(a.resolve_color("#12"), Err(AssistError::InvalidColorFormat(_))));
    }

    #[test]
    fn contrast_passthrough() {
        let a = assistant();
        let result = a.check_contrast("white", "#000000").unwrap();
        assert_eq!(result.ratio, 21.0);
        assert_eq!(result.rating, ContrastRating::Aaa);
    }

    #[test]
    fn harmony_passthrough() {
        let a = assistant();
        assert_eq!(a.harmony("#3498db", "Triadic").unwrap().len(), 3);
        assert_eq!(a.harmony("#3498db", "nonsense").unwrap(), vec![Rgb::new(52, 152, 219)]);
    }

    #[test]
    fn name_passthrough() {
        let a = assistant();
        assert_eq!(a.name_of("#010203").unwrap(), "black");
        assert_eq!(a.name_of("#ff0000").unwrap(), "red");
    }

    #[test]
    fn threshold_is_clamped() {
        let mut a = assistant();
        assert_eq!(a.set_overlay_threshold(300.0), 255.0);
        assert_eq!(a.set_overlay_threshold(191.0), 191.0);
    }
}
