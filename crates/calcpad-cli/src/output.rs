//! Output formatting

use calcpad::keypad::{key_to_event, Keypad};
use console::{style, Term};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;
use crate::runner::Transcript;

/// Key names listed by `calcpad keys`, in display order
pub const KEY_NAMES: [&str; 23] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", ",", "+", "-", "*", "/", "=", "Enter",
    "Escape", "c", "C", "Backspace", "q",
];

/// How `calcpad run` reports a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Final display only
    #[default]
    Text,
    /// One `key -> display` line per key
    Trace,
    /// JSON transcript
    Json,
}

impl OutputFormat {
    /// Picks the format from the `--trace` / `--json` flags
    #[must_use]
    pub const fn from_flags(trace: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if trace {
            Self::Trace
        } else {
            Self::Text
        }
    }
}

/// Renders a transcript in `format`
pub fn render_transcript(
    transcript: &Transcript,
    format: OutputFormat,
    use_color: bool,
) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(transcript.display().to_string()),
        OutputFormat::Trace => Ok(render_trace(transcript, use_color)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(transcript)?),
    }
}

/// `key -> display` per key; ignored keys are marked
#[must_use]
pub fn render_trace(transcript: &Transcript, use_color: bool) -> String {
    let width = transcript
        .steps
        .iter()
        .map(|step| step.key.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for step in &transcript.steps {
        let key = format!("{:>width$}", step.key);
        let line = match (step.event.is_some(), use_color) {
            (true, true) => format!("{} -> {}", style(key).cyan(), style(&step.display).bold()),
            (true, false) => format!("{key} -> {}", step.display),
            (false, true) => format!("{} -> {}", style(key).dim(), style("(ignored)").dim()),
            (false, false) => format!("{key} -> (ignored)"),
        };
        out.push_str(&line);
        out.push('\n');
    }
    let result = if use_color {
        style(transcript.display()).green().bold().to_string()
    } else {
        transcript.display().to_string()
    };
    out.push_str(&format!("= {result}"));
    out
}

/// Keys that produce the same event as `button_index` on `keypad`
#[must_use]
pub fn keys_for_button(keypad: &Keypad, button_index: usize) -> Vec<&'static str> {
    let Some(button) = keypad.get_button(button_index) else {
        return Vec::new();
    };
    KEY_NAMES
        .iter()
        .copied()
        .filter(|key| key_to_event(key) == Some(button.event))
        .collect()
}

/// The button / dataset / keyboard table printed by `calcpad keys`
#[must_use]
pub fn render_keys(keypad: &Keypad, use_color: bool) -> String {
    let header = format!(
        "{:<6} {:<14} {:<10} {:<6} {}",
        "button", "id", "action", "value", "keys"
    );
    let mut out = if use_color {
        style(header).bold().underlined().to_string()
    } else {
        header
    };
    out.push('\n');
    for (index, button) in keypad.buttons().iter().enumerate() {
        let (action, value) = button.dataset();
        let keys = keys_for_button(keypad, index).join(" ");
        out.push_str(&format!(
            "{:<6} {:<14} {:<10} {:<6} {}\n",
            button.label(),
            button.id,
            action,
            value.unwrap_or_default(),
            keys
        ));
    }
    out.push_str("\nterminal only: q, Ctrl+C, Ctrl+Q quit; mouse clicks press buttons");
    out
}

/// Writes command output to stdout
#[derive(Debug)]
pub struct Printer {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Printer {
    /// Create a printer
    #[must_use]
    pub fn new(use_color: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
        }
    }

    /// Print text, one terminal line per line
    pub fn print(&self, text: &str) -> CliResult<()> {
        for line in text.lines() {
            self.term.write_line(line)?;
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> CliResult<()> {
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        self.term.write_line(&format!("{prefix} {message}"))?;
        Ok(())
    }
}
