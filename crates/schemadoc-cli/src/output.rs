//! Everything the CLI prints on stdout
//!
//! Messages, section headers and tables only appear in the human format.
//! Machine formats (JSON, YAML) carry nothing but the data itself, so their
//! output can be piped straight into other tools.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::{debug, trace};

impl OutputFormat {
    /// Render a serializable value in this format, without a trailing newline
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = match self {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Human => {
                let mut lines = Vec::new();
                human_lines(&serde_json::to_value(value)?, 0, &mut lines);
                lines.join("\n")
            }
        };
        Ok(text.trim_end_matches('\n').to_string())
    }
}

/// `key: value` lines, nested values indented by two spaces
fn human_lines(value: &Value, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                match item {
                    Value::Object(inner) if !inner.is_empty() => {
                        lines.push(format!("{}{}:", indent, key));
                        human_lines(item, depth + 1, lines);
                    }
                    Value::Array(inner) if !inner.is_empty() => {
                        lines.push(format!("{}{}:", indent, key));
                        human_lines(item, depth + 1, lines);
                    }
                    _ => lines.push(format!("{}{}: {}", indent, key, scalar(item))),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        lines.push(format!("{}-", indent));
                        human_lines(item, depth + 1, lines);
                    }
                    _ => lines.push(format!("{}- {}", indent, scalar(item))),
                }
            }
        }
        _ => lines.push(format!("{}{}", indent, scalar(value))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Object(_) => "(none)".to_string(),
        Value::Array(_) => "(none)".to_string(),
        other => other.to_string(),
    }
}

/// How a one-line message is decorated
#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
}

/// Writer for everything the CLI prints
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Writer on stdout; spinners only when stdout is a terminal
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        let show_progress = !quiet && format == OutputFormat::Human && io::stdout().is_terminal();
        Self {
            format,
            use_color,
            show_progress,
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Writer on any sink, never showing spinners
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Raw text, exactly as given
    pub fn write(&mut self, content: &str) -> Result<()> {
        self.writer.write_all(content.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn writeln(&mut self, content: &str) -> Result<()> {
        self.write(content)?;
        self.write("\n")
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!(text = message, "Info message");
        self.message(Tone::Info, message)
    }

    pub fn success(&mut self, message: &str) -> Result<()> {
        self.message(Tone::Success, message)
    }

    /// Warnings still show in quiet mode
    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.message(Tone::Warning, message)
    }

    fn message(&mut self, tone: Tone, message: &str) -> Result<()> {
        let hidden_by_quiet = self.quiet && !matches!(tone, Tone::Warning);
        if hidden_by_quiet || !self.is_human() {
            return Ok(());
        }

        let line = match (tone, self.use_color) {
            (Tone::Info, true) => format!("{} {}", "ℹ".blue(), message),
            (Tone::Info, false) => format!("INFO: {}", message),
            (Tone::Success, true) => message.green().to_string(),
            (Tone::Success, false) => message.to_string(),
            (Tone::Warning, true) => message.yellow().to_string(),
            (Tone::Warning, false) => format!("WARNING: {}", message),
        };
        self.writeln(&line)
    }

    /// Blank line, then a section title
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        let heading = if self.use_color {
            format!("═══ {} ═══", title).bright_blue().to_string()
        } else {
            format!("=== {} ===", title)
        };
        self.writeln(&format!("\n{}", heading))
    }

    /// A value in the configured format, ending with one newline
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let rendered = self.format.render(value)?;
        trace!(bytes = rendered.len(), format = ?self.format, "Writing data");
        self.writeln(&rendered)
    }

    /// Spinner for work of unknown length, `None` when progress is hidden
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    /// Columns padded to the widest cell, separated by box-drawing rules
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        let widths = column_widths(headers, &rows);

        let header = padded_row(headers.iter().copied(), &widths);
        if self.use_color {
            self.writeln(&header.bold().to_string())?;
        } else {
            self.writeln(&header)?;
        }

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        self.writeln(&rule.join("─┼─"))?;

        for row in &rows {
            self.writeln(&padded_row(row.iter().map(String::as_str), &widths))?;
        }
        Ok(())
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

/// Cells past the last header keep their own width
fn padded_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(width) => format!("{:width$}", cell, width = width),
            None => cell.to_string(),
        })
        .collect();
    cells.join(" │ ").trim_end().to_string()
}

#[cfg(test)]
mod tests;
