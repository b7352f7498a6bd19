//! Error type for the assistant core.
//!
//! Every variant is recoverable and ends up as a one-line message in the
//! front end, except [`AssistError::NameTableEmpty`] at startup.

use std::io;
use std::path::PathBuf;

use hue_color::ColorError;
use hue_theory::TheoryError;
use thiserror::Error;

use crate::capture::CaptureError;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error(transparent)]
    InvalidColorFormat(#[from] ColorError),

    /// A save was requested before any destination file was chosen.
    #[error("no file selected")]
    NoDestinationSelected,

    /// A save was requested before the first successful sample.
    #[error("no color detected yet")]
    NoColorSampled,

    #[error("cannot set shortcut {shortcut:?}: {reason}")]
    ShortcutRegistrationFailed { shortcut: String, reason: String },

    /// The record could not be appended. It is dropped, not retried.
    #[error("cannot write to {}: {source}", path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("screen capture failed: {0}")]
    CaptureFailed(#[from] CaptureError),

    #[error("color name table is empty")]
    NameTableEmpty,

    #[error("settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<TheoryError> for AssistError {
    fn from(err: TheoryError) -> Self {
        match err {
            TheoryError::Color(e) => Self::InvalidColorFormat(e),
            TheoryError::NameTableEmpty => Self::NameTableEmpty,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;
