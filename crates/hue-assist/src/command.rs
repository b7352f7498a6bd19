//! Shell commands — one line of user input, parsed.
//!
//! A leading `:` is optional. Words are separated by whitespace; the last
//! argument of `dest`, `shortcut`, `press`, and the kind of `harmony` take
//! the rest of the line so they may contain spaces.
//!
//! # Supported commands
//!
//! | Command                        | Action                                  |
//! |--------------------------------|-----------------------------------------|
//! | `pick`                         | Sample once and show the result         |
//! | `move X Y`                     | Move the cursor                         |
//! | `area N`                       | Sampling box size (1–50 px)             |
//! | `hex on` / `hex off` / `hex`   | Show the hex code in the tooltip        |
//! | `name COLOR`                   | Nearest CSS3 name                       |
//! | `contrast A B`                 | WCAG contrast ratio and rating          |
//! | `harmony BASE [KIND]`          | Harmony palette (default Complementary) |
//! | `dest PATH`                    | Choose the save file                    |
//! | `save`                         | Save the current color                  |
//! | `shortcut KEYS`                | Set the save shortcut                   |
//! | `press KEYS`                   | Simulate a global key press             |
//! | `fill L T R B COLOR`           | Paint a box on the screen canvas        |
//! | `set OPTION...`                | Options, see below                      |
//! | `status`                       | Show the current state                  |
//! | `help`                         | List commands                           |
//! | `quit`                         | Exit                                    |
//!
//! A COLOR is `#rrggbb`, a CSS3 name, or `.` for the current sample.
//!
//! # Options
//!
//! | Syntax              | Effect                   |
//! |---------------------|--------------------------|
//! | `set hex` / `nohex` | Enable / disable         |
//! | `set hex!`          | Toggle                   |
//! | `set threshold=N`   | Overlay text threshold   |
//! | `set area=N`        | Sampling box size        |
//! | `set name?`         | Show one option          |
//! | `set`               | Show all options         |

use std::path::PathBuf;

use crate::capture::{Point, Region};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pick,
    Move(Point),
    Area(u32),
    /// `None` toggles.
    ShowHex(Option<bool>),
    Name(String),
    Contrast(String, String),
    Harmony { base: String, kind: String },
    Destination(PathBuf),
    Save,
    Shortcut(String),
    Press(String),
    Fill { region: Region, color: String },
    Set(Vec<SetDirective>),
    Status,
    Help,
    Quit,
    /// Known command, bad arguments. Carries the usage line.
    Usage(&'static str),
    /// Unknown command — contains the full input for error reporting.
    Unknown(String),
}

/// A parsed `set` argument.
#[derive(Debug, Clone, PartialEq)]
pub enum SetDirective {
    On(String),
    Off(String),
    Toggle(String),
    Query(String),
    Assign(String, String),
    ShowAll,
}

/// Boolean options.
const BOOL_OPTIONS: [&str; 1] = ["hex"];

/// Parse one input line. Blank lines give `None`.
#[must_use]
pub fn parse(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return None;
    }

    let (cmd, arg) = trimmed
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |pos| (&trimmed[..pos], trimmed[pos..].trim_start()));
    let args: Vec<&str> = arg.split_whitespace().collect();

    let command = match cmd {
        "pick" | "p" => Command::Pick,
        "move" | "m" => parse_move(&args),
        "area" => args
            .first()
            .and_then(|n| n.parse().ok())
            .map_or(Command::Usage("area N"), Command::Area),
        "hex" => match args.as_slice() {
            [] => Command::ShowHex(None),
            ["on"] => Command::ShowHex(Some(true)),
            ["off"] => Command::ShowHex(Some(false)),
            _ => Command::Usage("hex [on|off]"),
        },
        "name" => match args.as_slice() {
            [color] => Command::Name((*color).to_string()),
            _ => Command::Usage("name COLOR"),
        },
        "contrast" | "c" => match args.as_slice() {
            [a, b] => Command::Contrast((*a).to_string(), (*b).to_string()),
            _ => Command::Usage("contrast COLOR COLOR"),
        },
        "harmony" | "h" => parse_harmony(arg),
        "dest" => {
            if arg.is_empty() {
                Command::Usage("dest PATH")
            } else {
                Command::Destination(PathBuf::from(arg))
            }
        }
        "save" | "w" => Command::Save,
        "shortcut" => rest_or(arg, Command::Shortcut, "shortcut KEYS"),
        "press" => rest_or(arg, Command::Press, "press KEYS"),
        "fill" => parse_fill(&args),
        "set" => Command::Set(parse_set(arg)),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    };
    Some(command)
}

fn rest_or(arg: &str, make: fn(String) -> Command, usage: &'static str) -> Command {
    if arg.is_empty() {
        Command::Usage(usage)
    } else {
        make(arg.to_string())
    }
}

fn parse_move(args: &[&str]) -> Command {
    match args {
        [x, y] => match (x.parse(), y.parse()) {
            (Ok(x), Ok(y)) => Command::Move(Point::new(x, y)),
            _ => Command::Usage("move X Y"),
        },
        _ => Command::Usage("move X Y"),
    }
}

fn parse_harmony(arg: &str) -> Command {
    let (base, kind) = arg
        .find(char::is_whitespace)
        .map_or((arg, ""), |pos| (&arg[..pos], arg[pos..].trim()));
    if base.is_empty() {
        return Command::Usage("harmony COLOR [KIND]");
    }
    Command::Harmony {
        base: base.to_string(),
        kind: if kind.is_empty() { "Complementary" } else { kind }.to_string(),
    }
}

fn parse_fill(args: &[&str]) -> Command {
    const USAGE: &str = "fill LEFT TOP RIGHT BOTTOM COLOR";
    let [l, t, r, b, color] = args else {
        return Command::Usage(USAGE);
    };
    let coords: Option<Vec<i32>> = [l, t, r, b].iter().map(|s| s.parse().ok()).collect();
    match coords.as_deref() {
        Some(&[left, top, right, bottom]) => Command::Fill {
            region: Region { left, top, right, bottom },
            color: (*color).to_string(),
        },
        _ => Command::Usage(USAGE),
    }
}

/// Parse the arguments of `set`. No arguments shows everything.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowAll];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `set` argument.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }
    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }
    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }
    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }
    if let Some(name) = arg.strip_prefix("no") {
        if BOOL_OPTIONS.contains(&name) {
            return SetDirective::Off(name.to_string());
        }
    }
    if BOOL_OPTIONS.contains(&arg) {
        SetDirective::On(arg.to_string())
    } else {
        SetDirective::Query(arg.to_string())
    }
}

/// One-line summaries for `help`.
pub const HELP: &[(&str, &str)] = &[
    ("pick", "sample the color under the cursor"),
    ("move X Y", "move the cursor"),
    ("area N", "sampling box size, 1-50 px"),
    ("hex [on|off]", "show the hex code in the tooltip"),
    ("name COLOR", "nearest CSS3 color name"),
    ("contrast A B", "WCAG contrast ratio"),
    ("harmony COLOR [KIND]", "Complementary, Analogous, Triadic, Tetradic, Split Complementary"),
    ("dest PATH", "choose the save file (.csv or text)"),
    ("save", "save the current color"),
    ("shortcut KEYS", "set the save shortcut, e.g. ctrl+shift+s"),
    ("press KEYS", "simulate pressing a global shortcut"),
    ("fill L T R B COLOR", "paint a box on the screen canvas"),
    ("set OPTION", "hex, nohex, threshold=N, area=N"),
    ("status", "show settings and the current color"),
    ("quit", "exit"),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
