// SPDX-License-Identifier: MIT
//
// hue — a screen color assistant in the terminal.
//
// This binary wires the crates together:
//
//   hue-color  → Rgb, hex codec, luminance, overlay text tone
//   hue-theory → contrast rating, CSS3 naming, harmony palettes
//   hue-assist → Assistant state machine, capture/hotkey traits, log
//
// The "screen" is an in-memory canvas and the "mouse" a cursor moved with
// `move X Y`, so the whole pick → name → save pipeline runs anywhere.
//
// Loop:
//
//   stdin ─► reader thread ─► channel ─► recv_timeout(200 ms)
//                                          │ line    → parse → execute
//                                          │ timeout → tick  → tooltip
//
// The tooltip is reprinted only when the sample changes, so an idle
// cursor produces no output.

mod ansi;
mod reader;

use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use hue_assist::command::{self, Command, SetDirective};
use hue_assist::{
    AssistError, Assistant, Canvas, FixedCursor, MemoryHotkeys, Point,
    RecordFormat, Region, SETTINGS_FILE, Settings, Shortcut, logging,
};
use hue_color::{Rgb, overlay_text};
use hue_theory::naming::CSS3_COLORS;
use hue_theory::{ContrastResult, NameTable, swatch_label};

/// Sampling period, matching the assistant's original refresh rate.
const TICK: Duration = Duration::from_millis(200);

const CANVAS_WIDTH: u32 = 80;
const CANVAS_HEIGHT: u32 = 40;

type App = Assistant<FixedCursor, Canvas, MemoryHotkeys>;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A canvas striped with a few named colors, so moving the cursor shows
/// something other than one flat color.
fn demo_canvas() -> Canvas {
    const STRIPES: [Rgb; 8] = [
        Rgb::new(255, 99, 71),   // tomato
        Rgb::new(255, 215, 0),   // gold
        Rgb::new(46, 139, 87),   // seagreen
        Rgb::new(70, 130, 180),  // steelblue
        Rgb::new(218, 112, 214), // orchid
        Rgb::new(52, 152, 219),
        Rgb::WHITE,
        Rgb::BLACK,
    ];
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, Rgb::WHITE);
    let band = i32::try_from(CANVAS_WIDTH).unwrap_or(i32::MAX) / 8;
    let height = i32::try_from(CANVAS_HEIGHT).unwrap_or(i32::MAX);
    for (i, color) in (0..).zip(STRIPES) {
        let region = Region {
            left: i * band,
            top: 0,
            right: (i + 1) * band,
            bottom: height,
        };
        canvas.fill(region, color);
    }
    canvas
}

// ─── Shell ──────────────────────────────────────────────────────────────────

struct Shell {
    app: App,
    /// Whether the last tick's capture failed, so the error prints once.
    capture_failing: bool,
}

impl Shell {
    const fn new(app: App) -> Self {
        Self {
            app,
            capture_failing: false,
        }
    }

    /// Print the current sample as a swatch with its label.
    fn tooltip(&self, out: &mut impl Write) -> io::Result<()> {
        let state = self.app.state();
        let Some(sample) = &state.last_sample else {
            return writeln!(out, "(no color yet)");
        };
        let tone = sample.text_tone(state.overlay_threshold());
        ansi::swatch(out, sample.rgb, tone, &sample.label(state.show_hex))?;
        let Point { x, y } = self.app.cursor_position();
        writeln!(out, " at ({x}, {y})")
    }

    /// A swatch for `rgb` followed by its hex code and name.
    fn describe(&self, out: &mut impl Write, caption: &str, rgb: Rgb) -> io::Result<()> {
        let tone = overlay_text(rgb, self.app.state().overlay_threshold());
        ansi::swatch(out, rgb, tone, caption)?;
        writeln!(out, " {} {}", rgb.to_hex(), self.app.names().nearest(rgb))
    }

    fn report(out: &mut impl Write, result: Result<String, AssistError>) -> io::Result<()> {
        match result {
            Ok(msg) => writeln!(out, "{msg}"),
            Err(e) => writeln!(out, "error: {e}"),
        }
    }

    /// One timer step.
    fn on_tick(&mut self, out: &mut impl Write) -> io::Result<()> {
        let tick = self.app.tick();
        match tick.capture_error {
            Some(e) => {
                if !self.capture_failing {
                    writeln!(out, "error: {e}")?;
                }
                self.capture_failing = true;
            }
            None => {
                self.capture_failing = false;
                if tick.changed {
                    self.tooltip(out)?;
                }
            }
        }
        for save in tick.saves {
            Self::report(out, save)?;
        }
        Ok(())
    }

    fn execute(&mut self, cmd: Command, out: &mut impl Write) -> io::Result<Flow> {
        match cmd {
            Command::Pick => match self.app.sample() {
                Ok(_) => self.tooltip(out)?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Command::Move(point) => {
                self.app.cursor_mut().move_to(point);
                match self.app.sample() {
                    Ok(_) => self.tooltip(out)?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            Command::Area(n) => {
                let stored = self.app.set_area(n);
                writeln!(out, "area {stored} px")?;
            }
            Command::ShowHex(show) => {
                let show = show.unwrap_or(!self.app.state().show_hex);
                self.app.set_show_hex(show);
                writeln!(out, "hex {}", if show { "on" } else { "off" })?;
            }
            Command::Name(text) => match self.app.resolve_color(&text) {
                Ok(rgb) => self.describe(out, &rgb.to_string(), rgb)?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Command::Contrast(a, b) => self.contrast(out, &a, &b)?,
            Command::Harmony { base, kind } => self.harmony(out, &base, &kind)?,
            Command::Destination(path) => {
                let format = match RecordFormat::for_path(&path) {
                    RecordFormat::Csv => "CSV",
                    RecordFormat::Text => "text",
                };
                writeln!(out, "saving to {} ({format})", path.display())?;
                self.app.set_destination(path);
            }
            Command::Save => Self::report(out, self.app.save_current())?,
            Command::Shortcut(text) => Self::report(out, self.app.set_shortcut(&text))?,
            Command::Press(text) => self.press(out, &text)?,
            Command::Fill { region, color } => match self.app.resolve_color(&color) {
                Ok(rgb) => {
                    self.app.sampler_mut().fill(region, rgb);
                    writeln!(out, "filled {region} with {}", rgb.to_hex())?;
                }
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Command::Set(directives) => {
                for directive in directives {
                    self.set(out, directive)?;
                }
            }
            Command::Status => self.status(out)?,
            Command::Help => {
                for (usage, summary) in command::HELP {
                    writeln!(out, "  {usage:<22} {summary}")?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Usage(usage) => writeln!(out, "usage: {usage}")?,
            Command::Unknown(input) => writeln!(out, "unknown command: {input} (try help)")?,
        }
        Ok(Flow::Continue)
    }

    fn contrast(&self, out: &mut impl Write, a: &str, b: &str) -> io::Result<()> {
        let (fore, back) = match (self.app.resolve_color(a), self.app.resolve_color(b)) {
            (Ok(fore), Ok(back)) => (fore, back),
            (Err(e), _) | (_, Err(e)) => return writeln!(out, "error: {e}"),
        };
        let result = ContrastResult::between(fore, back);
        ansi::bg(out, back)?;
        ansi::fg(out, fore)?;
        write!(out, " Sample text ")?;
        ansi::reset(out)?;
        writeln!(out, " {} on {}: {result}", fore.to_hex(), back.to_hex())
    }

    fn harmony(&self, out: &mut impl Write, base: &str, kind: &str) -> io::Result<()> {
        match self.app.harmony(base, kind) {
            Ok(palette) => {
                for (i, rgb) in palette.into_iter().enumerate() {
                    self.describe(out, &format!("{:<7}", swatch_label(i)), rgb)?;
                }
                Ok(())
            }
            Err(e) => writeln!(out, "error: {e}"),
        }
    }

    fn press(&mut self, out: &mut impl Write, text: &str) -> io::Result<()> {
        let shortcut: Shortcut = match text.parse() {
            Ok(s) => s,
            Err(e) => return writeln!(out, "error: {e}"),
        };
        if !self.app.hotkeys_mut().press(shortcut) {
            return writeln!(out, "{shortcut} is not registered");
        }
        // Deliver now rather than on the next timer step.
        for save in self.app.handle_hotkeys() {
            Self::report(out, save)?;
        }
        Ok(())
    }

    fn set(&mut self, out: &mut impl Write, directive: SetDirective) -> io::Result<()> {
        match directive {
            SetDirective::On(name) | SetDirective::Off(name) | SetDirective::Toggle(name)
                if name != "hex" =>
            {
                writeln!(out, "unknown option: {name}")
            }
            SetDirective::On(_) => self.execute(Command::ShowHex(Some(true)), out).map(drop),
            SetDirective::Off(_) => self.execute(Command::ShowHex(Some(false)), out).map(drop),
            SetDirective::Toggle(_) => self.execute(Command::ShowHex(None), out).map(drop),
            SetDirective::Assign(name, value) => match name.as_str() {
                "threshold" => match value.parse::<f64>() {
                    Ok(v) if v.is_finite() => {
                        let stored = self.app.set_overlay_threshold(v);
                        writeln!(out, "threshold={stored}")
                    }
                    _ => writeln!(out, "error: threshold must be a number, got {value:?}"),
                },
                "area" => match value.parse::<u32>() {
                    Ok(v) => {
                        let stored = self.app.set_area(v);
                        writeln!(out, "area={stored}")
                    }
                    Err(_) => writeln!(out, "error: area must be a whole number, got {value:?}"),
                },
                _ => writeln!(out, "unknown option: {name}"),
            },
            SetDirective::Query(name) => self.show_option(out, &name),
            SetDirective::ShowAll => {
                for name in ["hex", "threshold", "area"] {
                    self.show_option(out, name)?;
                }
                Ok(())
            }
        }
    }

    fn show_option(&self, out: &mut impl Write, name: &str) -> io::Result<()> {
        let state = self.app.state();
        match name {
            "hex" => writeln!(out, "{}", if state.show_hex { "hex" } else { "nohex" }),
            "threshold" => writeln!(out, "threshold={}", state.overlay_threshold()),
            "area" => writeln!(out, "area={}", state.area()),
            _ => writeln!(out, "unknown option: {name}"),
        }
    }

    fn status(&self, out: &mut impl Write) -> io::Result<()> {
        let state = self.app.state();
        match &state.destination {
            Some(path) => writeln!(out, "destination: {}", path.display())?,
            None => writeln!(out, "destination: no file selected")?,
        }
        match state.shortcut {
            Some(s) => writeln!(out, "shortcut:    {s}")?,
            None => writeln!(out, "shortcut:    none")?,
        }
        writeln!(out, "area:        {} px", state.area())?;
        writeln!(out, "hex:         {}", if state.show_hex { "on" } else { "off" })?;
        writeln!(out, "threshold:   {}", state.overlay_threshold())?;
        write!(out, "color:       ")?;
        self.tooltip(out)
    }
}

/// Run the loop until `quit` or stdin closes.
fn run(shell: &mut Shell, rx: &Receiver<String>, out: &mut impl Write) -> io::Result<()> {
    loop {
        match rx.recv_timeout(TICK) {
            Ok(line) => {
                if let Some(cmd) = command::parse(&line) {
                    if shell.execute(cmd, out)? == Flow::Quit {
                        return Ok(());
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => shell.on_tick(out)?,
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
        out.flush()?;
    }
}

fn main() {
    logging::init();

    let names = NameTable::new(&CSS3_COLORS).unwrap_or_else(|e| {
        eprintln!("hue: {e}");
        process::exit(1);
    });

    let mut app = Assistant::new(
        names,
        FixedCursor::new(Point::new(5, 5)),
        demo_canvas(),
        MemoryHotkeys::new(),
    )
    .with_settings_path(SETTINGS_FILE);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    match app.restore_settings(&settings) {
        Ok(Some(msg)) => {
            let _ = writeln!(out, "{msg}");
        }
        Ok(None) => {}
        Err(e) => {
            let _ = writeln!(out, "error: {e}");
        }
    }

    let _ = writeln!(
        out,
        "hue: {CANVAS_WIDTH}x{CANVAS_HEIGHT} canvas, type `help` for commands"
    );

    let (_reader, rx) = reader::spawn().unwrap_or_else(|e| {
        eprintln!("hue: cannot start input thread: {e}");
        process::exit(1);
    });

    let mut shell = Shell::new(app);
    if let Err(e) = run(&mut shell, &rx, &mut out) {
        eprintln!("hue: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
