//! Output sink used by every user-facing message.
//!
//! The upload flow never prints directly: it hands styled spans to an
//! [`Output`]. [`Terminal`] paints them with crossterm, [`Buffer`] keeps the
//! plain text so tests can assert on what would have been shown.

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};

/// How a span of text is styled on a color terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Link,
    Warn,
    Error,
}

/// Which standard stream a line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
}

pub trait Output {
    /// Write one line made of styled spans.
    fn write_line(&mut self, target: Target, spans: &[(Tone, &str)]);

    fn blank(&mut self) {
        self.write_line(Target::Stdout, &[]);
    }

    fn info(&mut self, msg: &str) {
        self.write_line(Target::Stdout, &[(Tone::Info, msg)]);
    }

    fn success(&mut self, msg: &str) {
        self.write_line(Target::Stdout, &[(Tone::Success, msg)]);
    }

    fn link(&mut self, msg: &str) {
        self.write_line(Target::Stdout, &[(Tone::Link, msg)]);
    }

    /// Recoverable problem the user should see, on stdout.
    fn warn(&mut self, msg: &str) {
        self.write_line(Target::Stdout, &[(Tone::Warn, msg)]);
    }

    /// Recoverable problem reported on stderr (config warnings).
    fn warn_err(&mut self, msg: &str) {
        self.write_line(Target::Stderr, &[(Tone::Warn, msg)]);
    }

    /// Terminal failure, on stderr.
    fn error(&mut self, msg: &str) {
        self.write_line(Target::Stderr, &[(Tone::Error, msg)]);
    }
}

/// Colored output to the real stdout/stderr.
#[derive(Default)]
pub struct Terminal;

impl Output for Terminal {
    fn write_line(&mut self, target: Target, spans: &[(Tone, &str)]) {
        let line: String = spans.iter().map(|(tone, text)| paint(*tone, text)).collect();
        match target {
            Target::Stdout => println!("{line}"),
            Target::Stderr => eprintln!("{line}"),
        }
    }
}

fn paint(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Plain => text.to_string(),
        Tone::Info => text.cyan().to_string(),
        Tone::Success => text.green().bold().to_string(),
        Tone::Link => text.magenta().underlined().to_string(),
        Tone::Warn => text.yellow().to_string(),
        Tone::Error => text.red().bold().to_string(),
    }
}

/// Captures plain-text lines instead of printing them.
#[derive(Default, Debug)]
pub struct Buffer {
    pub lines: Vec<(Target, String)>,
}

impl Buffer {
    /// Lines written to the given stream, in order.
    pub fn lines_on(&self, target: Target) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(_, line)| line.contains(needle))
    }
}

impl Output for Buffer {
    fn write_line(&mut self, target: Target, spans: &[(Tone, &str)]) {
        let line: String = spans.iter().map(|(_, text)| *text).collect();
        self.lines.push((target, line));
    }
}

/// Run a blocking operation behind a spinner on stderr.
///
/// The spinner is only redrawn on explicit updates, so no ticker thread is
/// started; indicatif hides it entirely when stderr is not a terminal.
pub fn spin<T>(msg: &str, op: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.tick();

    let result = op();

    spinner.finish_and_clear();
    result
}
