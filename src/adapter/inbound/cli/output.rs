//! Terminal and JSON rendering for CLI handlers.
//!
//! Every event goes through [`emit`]: in JSON mode it becomes one
//! `{"type", "payload"}` line on stdout, in quiet mode informational events
//! are dropped, otherwise the human rendering runs. Colors are applied by
//! [`paint`] and vanish when color is off.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::RwLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

use super::command::ColorChoice;

const LABEL_WIDTH: usize = 14;
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_TICK: Duration = Duration::from_millis(80);

/// How the current process renders output, set once from global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
    pub color: bool,
}

impl OutputMode {
    const INITIAL: Self = Self {
        json: false,
        quiet: false,
        verbose: 0,
        color: true,
    };

    /// Resolve `--color auto` against `NO_COLOR` and whether stdout is a tty.
    #[must_use]
    pub fn new(json: bool, quiet: bool, verbose: u8, color: &ColorChoice) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        };
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }

    fn styled(self) -> bool {
        self.color && !self.json
    }
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::INITIAL
    }
}

static MODE: RwLock<OutputMode> = RwLock::new(OutputMode::INITIAL);

fn mode() -> OutputMode {
    *MODE.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Install the mode for the rest of the process.
pub fn configure(next: OutputMode) {
    *MODE.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = next;
}

#[must_use]
pub fn is_json() -> bool {
    mode().json
}

#[must_use]
pub fn verbosity() -> u8 {
    mode().verbose
}

fn paint(mode: OutputMode, text: &str, style: impl FnOnce(&str) -> String) -> String {
    if mode.styled() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Whether an informational event is dropped under `mode`.
fn suppressed(mode: OutputMode, essential: bool) -> bool {
    !essential && !mode.json && mode.quiet
}

/// Route one event. `essential` events survive `--quiet`.
fn emit(kind: &str, payload: Value, essential: bool, render: impl FnOnce(OutputMode)) {
    let mode = mode();
    if mode.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if !suppressed(mode, essential) {
        render(mode);
    }
}

/// Program name and version.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "kitfab", "version": version }),
        false,
        |mode| {
            println!(
                "{} {}",
                paint(mode, "kitfab", |t| t.bold().to_string()),
                paint(mode, version, |t| t.dimmed().to_string())
            );
        },
    );
}

/// A `label  value` row.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        false,
        |mode| {
            let label = format!("{label:<width$}", width = LABEL_WIDTH);
            println!("  {} {value}", paint(mode, &label, |t| t.dimmed().to_string()));
        },
    );
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), false, |mode| {
        println!("  {} {message}", paint(mode, "✓", |t| t.green().to_string()));
    });
}

pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), true, |mode| {
        println!("  {} {message}", paint(mode, "⚠", |t| t.yellow().to_string()));
    });
}

/// Fatal error, always on stderr.
pub fn error(message: &str) {
    let mode = mode();
    if mode.json {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {message}", paint(mode, "×", |t| t.red().to_string()));
    }
}

/// Blank line and a bold title.
pub fn section(title: &str) {
    emit("section", json!({ "title": title }), false, |mode| {
        println!();
        println!("{}", paint(mode, title, |t| t.bold().to_string()));
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), false, |mode| {
        println!("  {}", paint(mode, message, |t| t.dimmed().to_string()));
    });
}

pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), false, |mode| {
        println!(
            "  {}: {}",
            paint(mode, "hint", |t| t.cyan().dimmed().to_string()),
            paint(mode, message, |t| t.dimmed().to_string())
        );
    });
}

/// Pre-rendered block such as a table, indented.
pub fn lines(content: &str) {
    emit("lines", json!({ "content": content }), false, |_| {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

/// A whole command result as one JSON document.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Start a spinner on stderr; hidden in JSON or quiet mode.
pub fn spinner(message: &str) -> ProgressBar {
    let mode = mode();
    let pb = if mode.json || mode.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(SPINNER_TICK);
        pb
    };
    pb.set_message(message.to_string());
    pb
}

fn finish(pb: &ProgressBar, kind: &str, mark: &str, message: &str, essential: bool) {
    let mode = mode();
    if mode.json {
        println!("{}", json!({ "type": kind, "payload": { "message": message } }));
        pb.finish_and_clear();
    } else if suppressed(mode, essential) {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(format!("{mark} {message}"));
    }
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    let mark = paint(mode(), "✓", |t| t.green().to_string());
    finish(pb, "spinner_success", &mark, message, false);
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    let mark = paint(mode(), "×", |t| t.red().to_string());
    finish(pb, "spinner_fail", &mark, message, true);
}

/// Gains.
pub fn positive(value: impl Display) -> String {
    paint(mode(), &value.to_string(), |t| t.green().to_string())
}

/// Losses.
pub fn negative(value: impl Display) -> String {
    paint(mode(), &value.to_string(), |t| t.red().to_string())
}

/// Links and names worth spotting.
pub fn highlight(value: impl Display) -> String {
    paint(mode(), &value.to_string(), |t| t.cyan().to_string())
}
