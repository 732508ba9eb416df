//! Output formatting shared by all analysis commands.

use anyhow::{anyhow, Result};
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

/// A command result with a human-readable rendering.
pub trait TextReport {
    fn to_text(&self) -> String;
}

/// Renders a report in the requested format.
pub fn render<T: Serialize + TextReport>(report: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Prints a report to stdout in the requested format.
pub fn emit<T: Serialize + TextReport>(report: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render(report, format)?);
    Ok(())
}

pub(crate) fn header(title: &str) -> String {
    let rule = "═".repeat(62);
    format!("\n{rule}\n  {title}\n{rule}\n")
}
