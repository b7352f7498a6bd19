//! Persisted settings (`settings.json`).
//!
//! ```json
//! {
//!   "shortcut": "ctrl+shift+s",
//!   "overlay_threshold": 186.0,
//!   "sample_area": 10
//! }
//! ```
//!
//! Keys are written only when set, so a file holding just a shortcut is
//! `{"shortcut": "..."}`. On load, `"shortcut": null` and unknown keys are
//! accepted.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssistError, Result};

/// Default file name, relative to the working directory.
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_area: Option<u32>,
}

impl Settings {
    /// Read settings from `path`.
    ///
    /// A missing file yields the defaults silently. An unreadable or
    /// malformed file is logged and also yields the defaults.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings");
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed settings, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty-printed JSON, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::Settings`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let settings_err = |source| AssistError::Settings {
            path: path.to_path_buf(),
            source,
        };
        let mut json = serde_json::to_string_pretty(self).map_err(|e| settings_err(io::Error::from(e)))?;
        json.push('\n');
        fs::write(path, json).map_err(settings_err)?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("settings.json")), Settings::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn reads_shortcut_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"shortcut": "ctrl+shift+s"}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.shortcut.as_deref(), Some("ctrl+shift+s"));
        assert_eq!(settings.overlay_threshold, None);
    }

    #[test]
    fn null_shortcut_and_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"shortcut": null, "theme": "dark"}"#).unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            shortcut: Some("alt+f2".into()),
            overlay_threshold: Some(191.0),
            sample_area: Some(25),
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn unset_keys_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let read = || -> serde_json::Value { serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap() };

        Settings::default().save(&path).unwrap();
        assert_eq!(read(), serde_json::json!({}));

        let shortcut_only = Settings { shortcut: Some("ctrl+shift+s".into()), ..Settings::default() };
        shortcut_only.save(&path).unwrap();
        assert_eq!(read(), serde_json::json!({ "shortcut": "ctrl+shift+s" }));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::default().save(&dir.path().join("nope").join("s.json")).unwrap_err();
        assert!(matches!(err, AssistError::Settings { .. }));
    }
}
