// SPDX-License-Identifier: MIT
//
// ANSI truecolor output for swatches.
//
// Only 24-bit SGR sequences are emitted (`38;2;R;G;B` / `48;2;R;G;B`).

use std::io::{self, Write};

use hue_color::{Rgb, TextTone};

/// Set the foreground color.
pub fn fg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    let Rgb { r, g, b } = color;
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set the background color.
pub fn bg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    let Rgb { r, g, b } = color;
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

/// Reset all attributes.
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// ` text ` on a `color` background, in the given text tone.
pub fn swatch(w: &mut impl Write, color: Rgb, tone: TextTone, text: &str) -> io::Result<()> {
    bg(w, color)?;
    fg(w, tone.rgb())?;
    write!(w, " {text} ")?;
    reset(w)
}
