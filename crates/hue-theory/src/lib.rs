//! # hue-theory — Color analysis engine
//!
//! The three analyses the assistant runs on a color, each a pure function
//! over [`hue_color::Rgb`]:
//!
//! ```text
//! Rgb ──► naming.rs:   nearest CSS3 keyword (exact match, else linear scan)
//!  │
//!  ├───► contrast.rs: WCAG ratio between two colors + AAA/AA/Fail rating
//!  │
//!  └───► harmony.rs:  hue-rotated palettes (complementary, triadic, …)
//! ```
//!
//! Nothing here allocates state that outlives a call except the CSS3 name
//! table, which is built once and shared read-only.

// Mathematical code uses small integer-to-float casts (indices, offsets).
#![allow(clippy::cast_precision_loss)]

use thiserror::Error;

pub mod contrast;
pub mod harmony;
pub mod naming;

pub use contrast::{ContrastRating, ContrastResult, check_contrast, contrast_ratio};
pub use harmony::{HarmonyKind, harmony_colors, harmony_hex, swatch_label};
pub use naming::NameTable;

/// Errors from the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error(transparent)]
    Color(#[from] hue_color::ColorError),
    /// A name table was built with no entries; nothing could ever be named.
    #[error("color name table is empty")]
    NameTableEmpty,
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, TheoryError>;
