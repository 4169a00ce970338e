//! Output formatting shared by every command.
//!
//! Commands build one serializable result and hand it to [`render_mode`]
//! together with a text and a pretty writer. JSON is always the serde shape
//! of the result. Failures go to stderr through [`render_error`].
//!
//! The mode is `--format` when given, otherwise whatever
//! `folio_core::config::resolve_config` settled on (`--json`, `FORMAT`, user
//! config, TTY).

use clap::ValueEnum;
use folio_core::error::ErrorCode;
use serde::Serialize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 72;

pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(RULE_WIDTH))
}

/// Heading underlined by a rule.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// `Key:        value`, keys padded to a common column.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Sections and cards laid out for reading in a terminal.
    Pretty,
    /// Plain rows for scripts and pipes.
    Text,
    /// The serialized result.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// `--format` if given, else the name resolved from config and environment.
/// Unrecognised names fall back to text.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, resolved: &str) -> OutputMode {
    format_flag.unwrap_or(match resolved {
        "json" => OutputMode::Json,
        "pretty" => OutputMode::Pretty,
        _ => OutputMode::Text,
    })
}

/// Print `value` to stdout in `mode`.
pub fn render_mode<T: Serialize + ?Sized>(
    mode: OutputMode,
    value: &T,
    text: impl Fn(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl Fn(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    write_mode(mode, value, text, pretty, &mut stdout.lock())
}

fn write_mode<T: Serialize + ?Sized>(
    mode: OutputMode,
    value: &T,
    text: impl Fn(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl Fn(&T, &mut dyn Write) -> io::Result<()>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text(value, out)?,
        OutputMode::Pretty => pretty(value, out)?,
    }
    Ok(())
}

/// A user-facing failure with its stable error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub error_code: String,
}

impl CliError {
    pub fn from_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: code.code().to_string(),
        }
    }
}

/// Print `error` to stderr: `{"error": {...}}` in JSON mode, two lines otherwise.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    write_error(mode, error, &mut stderr.lock())
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "error[{}]: {}", error.error_code, error.message)?;
    if let Some(suggestion) = &error.suggestion {
        writeln!(out, "  hint: {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Count {
        name: &'static str,
        total: usize,
    }

    fn text(c: &Count, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}", c.name, c.total)
    }

    fn pretty(c: &Count, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, c.name, c.total.to_string())
    }

    fn written(mode: OutputMode) -> String {
        let value = Count {
            name: "poems",
            total: 12,
        };
        let mut buf = Vec::new();
        write_mode(mode, &value, text, pretty, &mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn format_flag_wins_over_resolved_mode() {
        assert_eq!(
            resolve_output_mode(Some(OutputMode::Text), "json"),
            OutputMode::Text
        );
        assert_eq!(resolve_output_mode(None, "json"), OutputMode::Json);
        assert_eq!(resolve_output_mode(None, "pretty"), OutputMode::Pretty);
        assert_eq!(resolve_output_mode(None, "fancy"), OutputMode::Text);
    }

    #[test]
    fn each_mode_uses_its_writer() {
        assert_eq!(written(OutputMode::Text), "poems  12\n");
        assert_eq!(written(OutputMode::Pretty), "poems:       12\n");

        let json: serde_json::Value =
            serde_json::from_str(&written(OutputMode::Json)).expect("valid JSON");
        assert_eq!(json["total"], 12);
    }

    #[test]
    fn errors_carry_code_and_hint() {
        let err = CliError::from_code("work 'x' not found", ErrorCode::WorkNotFound);

        let mut plain = Vec::new();
        write_error(OutputMode::Pretty, &err, &mut plain).expect("write");
        let plain = String::from_utf8(plain).expect("utf8");
        assert!(plain.starts_with("error[E3001]: work 'x' not found\n  hint: "));

        let mut json = Vec::new();
        write_error(OutputMode::Json, &err, &mut json).expect("write");
        let json: serde_json::Value = serde_json::from_slice(&json).expect("valid JSON");
        assert_eq!(json["error"]["error_code"], "E3001");
    }
}
