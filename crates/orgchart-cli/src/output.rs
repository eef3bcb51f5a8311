//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for scripts and pipes,
//! or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `[output] format` in `orgchart.toml`
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Steps 2-4 are resolved by `orgchart_core::config::resolve_config`; this
//! module only maps the resolved name back to an [`OutputMode`].

use clap::ValueEnum;
use orgchart_core::error::{ErrorCode, HierarchyError};
use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<20} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (trees, sections, visual framing).
    Pretty,
    /// Plain text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Map a name produced by config resolution back to a mode.
    ///
    /// Unknown names fall back to [`OutputMode::Text`].
    pub fn from_resolved(name: &str) -> Self {
        match name {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. `E2003`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }

    /// Error carrying the code and hint of `code`.
    pub fn coded(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }

    /// Classify an error bubbling out of a command handler.
    ///
    /// Domain errors keep their own code. Anything else is reported with the
    /// full context chain and no code.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cli) = err.downcast_ref::<Self>() {
            return Self {
                message: cli.message.clone(),
                suggestion: cli.suggestion.clone(),
                error_code: cli.error_code.clone(),
            };
        }
        if let Some(domain) = err.downcast_ref::<HierarchyError>() {
            return Self::from(domain);
        }
        Self::new(format!("{err:#}"))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Convert a [`HierarchyError`] into a [`CliError`].
impl From<&HierarchyError> for CliError {
    fn from(err: &HierarchyError) -> Self {
        Self::coded(err.to_string(), err.code())
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In pretty mode
/// `pretty_fn` is called, in text mode `text_fn`.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)?;
    Ok(())
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgchart_core::model::MemberId;

    #[test]
    fn resolved_names_map_to_modes() {
        assert_eq!(OutputMode::from_resolved("pretty"), OutputMode::Pretty);
        assert_eq!(OutputMode::from_resolved("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_resolved("text"), OutputMode::Text);
        assert_eq!(OutputMode::from_resolved("???"), OutputMode::Text);
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Pretty.is_json());
    }

    #[test]
    fn hierarchy_errors_carry_code_and_hint() {
        let err = HierarchyError::CycleDetected {
            member: MemberId(1),
            proposed_manager: MemberId(3),
            path: vec![MemberId(1), MemberId(2), MemberId(3)],
        };
        let cli = CliError::from(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2003"));
        assert!(cli.message.contains("1 -> 2 -> 3"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn from_anyhow_recovers_domain_and_cli_errors() {
        let domain = anyhow::Error::new(HierarchyError::MemberNotFound(MemberId(9)));
        assert_eq!(
            CliError::from_anyhow(&domain).error_code.as_deref(),
            Some("E2001")
        );

        let cli = anyhow::Error::new(CliError::with_details("boom", "try again", "E1002"));
        let back = CliError::from_anyhow(&cli);
        assert_eq!(back.message, "boom");
        assert_eq!(back.error_code.as_deref(), Some("E1002"));

        let plain = anyhow::anyhow!("inner").context("outer");
        let back = CliError::from_anyhow(&plain);
        assert_eq!(back.message, "outer: inner");
        assert!(back.error_code.is_none());
    }

    #[test]
    fn text_error_includes_suggestion() {
        let mut out = Vec::new();
        write_error(
            OutputMode::Text,
            &CliError::with_details("no snapshot", "pass --members", "E1002"),
            &mut out,
        )
        .expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert_eq!(rendered, "error: no snapshot\n  suggestion: pass --members\n");
    }

    #[test]
    fn json_error_is_wrapped() {
        let mut out = Vec::new();
        write_error(OutputMode::Json, &CliError::new("bad"), &mut out).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["error"]["message"], "bad");
        assert!(value["error"].get("suggestion").is_none());
    }

    #[test]
    fn pretty_kv_aligns_keys() {
        let mut out = Vec::new();
        pretty_kv(&mut out, "roots", "3").expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), format!("{:<20} 3\n", "roots:"));
    }
}
