//! The append-only color log.
//!
//! Each saved color becomes one row. The file format follows the
//! destination name: a path ending in `.csv` gets a CSV row
//!
//! ```text
//! tomato,"(255, 99, 71)",#ff6347\r\n
//! ```
//!
//! with minimal quoting, and anything else gets a plain text line
//!
//! ```text
//! tomato | RGB: (255, 99, 71) | HEX: #ff6347\n
//! ```
//!
//! The suffix check is exact and case-sensitive: `colors.CSV` is a text
//! log. The file is opened in append mode for every row and never
//! rewritten, truncated, or deduplicated.

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use hue_color::Rgb;

use crate::error::{AssistError, Result};
use crate::state::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Csv,
    Text,
}

impl RecordFormat {
    /// Pick the format from the destination path.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        if path.as_os_str().to_string_lossy().ends_with(".csv") {
            Self::Csv
        } else {
            Self::Text
        }
    }
}

/// One saved color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedColorRecord {
    pub name: String,
    pub rgb: Rgb,
    pub hex: String,
}

impl SavedColorRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
            hex: rgb.to_hex(),
        }
    }

    /// The row for `format`, including its line terminator.
    #[must_use]
    pub fn render(&self, format: RecordFormat) -> String {
        match format {
            RecordFormat::Csv => {
                let rgb = self.rgb.to_string();
                format!(
                    "{},{},{}\r\n",
                    csv_field(&self.name),
                    csv_field(&rgb),
                    csv_field(&self.hex)
                )
            }
            RecordFormat::Text => format!("{} | RGB: {} | HEX: {}\n", self.name, self.rgb, self.hex),
        }
    }
}

impl From<&Sample> for SavedColorRecord {
    fn from(sample: &Sample) -> Self {
        Self {
            name: sample.name.clone(),
            rgb: sample.rgb,
            hex: sample.hex.clone(),
        }
    }
}

/// Quote a CSV field only when it contains a delimiter, quote, or line break.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// A destination file for saved colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLog {
    path: PathBuf,
    format: RecordFormat,
}

impl ColorLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = RecordFormat::for_path(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> RecordFormat {
        self.format
    }

    /// Append one row, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::FileWriteFailed`] if the file cannot be opened
    /// or written. The record is lost.
    pub fn append(&self, record: &SavedColorRecord) -> Result<()> {
        let row = record.render(self.format);
        let write_failed = |source| AssistError::FileWriteFailed {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_failed)?;
        file.write_all(row.as_bytes()).map_err(write_failed)?;

        tracing::info!(path = %self.path.display(), name = %record.name, hex = %record.hex, "color saved");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
