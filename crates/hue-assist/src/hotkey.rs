//! Global keyboard shortcuts.
//!
//! A shortcut is written `mod+mod+key`, e.g. `ctrl+shift+s`. Modifier names
//! accept the common aliases (`control`, `option`, `win`, `cmd`, `meta`);
//! keys are a single character, `f1`..`f24`, or a named key such as
//! `space` or `enter`. Parsing is case-insensitive and the canonical form
//! is lowercase with modifiers in `ctrl+alt+shift+super` order, so two
//! spellings of the same chord compare equal.
//!
//! Registration with the operating system goes through
//! [`GlobalHotkeyRegistry`]. [`MemoryHotkeys`] is an in-memory registry
//! where a "key press" is simulated with [`MemoryHotkeys::press`].

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Modifier keys held for a shortcut.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0001;
        const ALT   = 0b0010;
        const SHIFT = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Modifiers in canonical display order.
const MODIFIER_ORDER: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "ctrl"),
    (Modifiers::ALT, "alt"),
    (Modifiers::SHIFT, "shift"),
    (Modifiers::SUPER, "super"),
];

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name {
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "alt" | "option" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "super" | "win" | "windows" | "cmd" | "command" | "meta" => Some(Modifiers::SUPER),
        _ => None,
    }
}

// ─── Key ─────────────────────────────────────────────────────────────────────

/// The non-modifier key of a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, stored lowercase.
    Char(char),
    /// Function key `F1`..`F24`.
    F(u8),
    Space,
    Enter,
    Tab,
    Esc,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    PrintScreen,
    Plus,
}

const NAMED_KEYS: [(Key, &str); 17] = [
    (Key::Space, "space"),
    (Key::Enter, "enter"),
    (Key::Tab, "tab"),
    (Key::Esc, "esc"),
    (Key::Backspace, "backspace"),
    (Key::Delete, "delete"),
    (Key::Insert, "insert"),
    (Key::Home, "home"),
    (Key::End, "end"),
    (Key::PageUp, "pageup"),
    (Key::PageDown, "pagedown"),
    (Key::Up, "up"),
    (Key::Down, "down"),
    (Key::Left, "left"),
    (Key::Right, "right"),
    (Key::PrintScreen, "printscreen"),
    (Key::Plus, "plus"),
];

impl Key {
    fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return (!c.is_whitespace()).then_some(Self::Char(c));
        }

        let alias = match name {
            "return" => "enter",
            "escape" => "esc",
            "del" => "delete",
            "ins" => "insert",
            "pgup" => "pageup",
            "pgdn" => "pagedown",
            "prtsc" | "print" => "printscreen",
            other => other,
        };
        if let Some(&(key, _)) = NAMED_KEYS.iter().find(|(_, n)| *n == alias) {
            return Some(key);
        }

        let n: u8 = alias.strip_prefix('f')?.parse().ok()?;
        (1..=24).contains(&n).then_some(Self::F(n))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "f{n}"),
            named => {
                let name = NAMED_KEYS
                    .iter()
                    .find(|(k, _)| k == named)
                    .map_or("?", |(_, n)| n);
                f.write_str(name)
            }
        }
    }
}

// ─── Shortcut ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutError {
    #[error("shortcut is empty")]
    Empty,
    #[error("missing key after modifiers")]
    MissingKey,
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("{0:?} is not a modifier")]
    NotAModifier(String),
    #[error("modifier {0:?} given twice")]
    DuplicateModifier(String),
}

/// A key chord such as `ctrl+shift+s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl Shortcut {
    #[must_use]
    pub const fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.is_empty() {
            return Err(ShortcutError::Empty);
        }

        let parts: Vec<&str> = lower.split('+').map(str::trim).collect();
        let (key_part, mod_parts) = parts
            .split_last()
            .ok_or(ShortcutError::Empty)?;
        if key_part.is_empty() {
            return Err(ShortcutError::MissingKey);
        }

        let mut modifiers = Modifiers::empty();
        for part in mod_parts {
            let m = parse_modifier(part).ok_or_else(|| ShortcutError::NotAModifier((*part).to_string()))?;
            if modifiers.contains(m) {
                return Err(ShortcutError::DuplicateModifier((*part).to_string()));
            }
            modifiers |= m;
        }

        let key = Key::parse(key_part).ok_or_else(|| ShortcutError::UnknownKey((*key_part).to_string()))?;
        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in MODIFIER_ORDER {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    #[error("{0} is already registered")]
    AlreadyRegistered(Shortcut),
    #[error("{0} is reserved by another application")]
    Reserved(Shortcut),
    #[error("{0}")]
    Backend(String),
}

/// System-wide hotkey registration.
///
/// Triggers are collected by the registry and drained by the caller's loop
/// with [`take_triggered`](Self::take_triggered), so callbacks never run on
/// a foreign thread.
pub trait GlobalHotkeyRegistry {
    /// # Errors
    ///
    /// Fails when the chord is already taken.
    fn register(&mut self, shortcut: Shortcut) -> Result<(), HotkeyError>;

    /// Remove a registration. Unknown shortcuts are ignored.
    fn unregister(&mut self, shortcut: Shortcut);

    /// Shortcuts pressed since the last call, oldest first.
    fn take_triggered(&mut self) -> Vec<Shortcut>;
}

/// In-memory hotkey registry.
#[derive(Debug, Default)]
pub struct MemoryHotkeys {
    registered: Vec<Shortcut>,
    reserved: Vec<Shortcut>,
    pending: VecDeque<Shortcut>,
}

impl MemoryHotkeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a chord as owned by some other program; registering it fails.
    pub fn reserve(&mut self, shortcut: Shortcut) {
        self.reserved.push(shortcut);
    }

    #[must_use]
    pub fn is_registered(&self, shortcut: Shortcut) -> bool {
        self.registered.contains(&shortcut)
    }

    /// Simulate pressing `shortcut`. Returns whether it was delivered.
    pub fn press(&mut self, shortcut: Shortcut) -> bool {
        if self.is_registered(shortcut) {
            self.pending.push_back(shortcut);
            true
        } else {
            false
        }
    }
}

impl GlobalHotkeyRegistry for MemoryHotkeys {
    fn register(&mut self, shortcut: Shortcut) -> Result<(), HotkeyError> {
        if self.reserved.contains(&shortcut) {
            return Err(HotkeyError::Reserved(shortcut));
        }
        if self.is_registered(shortcut) {
            return Err(HotkeyError::AlreadyRegistered(shortcut));
        }
        self.registered.push(shortcut);
        Ok(())
    }

    fn unregister(&mut self, shortcut: Shortcut) {
        self.registered.retain(|s| *s != shortcut);
        self.pending.retain(|s| *s != shortcut);
    }

    fn take_triggered(&mut self) -> Vec<Shortcut> {
        self.pending.drain(..).collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
