// SPDX-License-Identifier: MIT
//
// hue-color — Color math for the hue screen color assistant.
//
// Everything in here is a pure function of its inputs. The crate knows how
// to read and write `#rrggbb` strings, how bright a color is according to
// WCAG and to the older perceived-brightness formula, and how to move
// between RGB and HSL for hue rotation. It knows nothing about screens,
// names, or files; those live further up the stack.
//
//   hex string ─► Rgb ─► relative luminance ─► contrast (hue-theory)
//                   │
//                   └─► Hsl ─► hue rotation ─► Rgb (hue-theory harmony)

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]

pub mod hsl;
pub mod luminance;
pub mod rgb;

pub use hsl::Hsl;
pub use luminance::{TextTone, overlay_text, perceived_brightness, relative_luminance};
pub use rgb::{ColorError, Rgb};

/// Result type for color decoding.
pub type Result<T> = std::result::Result<T, ColorError>;
