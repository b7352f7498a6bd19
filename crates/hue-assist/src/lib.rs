//! # hue-assist — Color assistant core
//!
//! Everything the assistant does between "the cursor moved" and "a row was
//! appended to the log", with the operating system kept behind traits:
//!
//! ```text
//!   CursorPositionSource ─┐
//!   ScreenSampler ────────┼──► Assistant ──► Sample (name, hex, tone)
//!   GlobalHotkeyRegistry ─┘        │
//!                                  ├──► ColorLog   (append-only CSV / text)
//!                                  └──► Settings   (settings.json)
//! ```
//!
//! The [`Assistant`] owns all mutable state. A front end drives it by
//! calling [`Assistant::tick`] on a timer and forwarding user commands,
//! parsed by [`command::parse`].

pub mod assistant;
pub mod capture;
pub mod command;
pub mod error;
pub mod hotkey;
pub mod logging;
pub mod record;
pub mod settings;
pub mod state;

pub use assistant::{Assistant, Tick};
pub use capture::{
    Canvas, CaptureError, CursorPositionSource, FixedCursor, Point, Region, ScreenSampler,
    average_color,
};
pub use command::Command;
pub use error::{AssistError, Result};
pub use hotkey::{
    GlobalHotkeyRegistry, HotkeyError, Key, MemoryHotkeys, Modifiers, Shortcut, ShortcutError,
};
pub use record::{ColorLog, RecordFormat, SavedColorRecord};
pub use settings::{SETTINGS_FILE, Settings};
pub use state::{AppState, DEFAULT_AREA, MAX_AREA, MIN_AREA, Sample};
