//! Shared formatting helpers for tables and JSON output

use amm_model::{IlSeverity, SlippageSeverity};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Table
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn header(title: &str) {
    println!("{}", format!("=== {} ===", title).bright_green().bold());
}

pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", format!("{}:", label).bright_cyan(), value);
}

/// IL fraction as a signed percentage, coloured by severity
pub fn il_cell(il: f64, severity: IlSeverity, width: usize) -> ColoredString {
    let text = format!("{:>width$.3}%", il * 100.0, width = width);
    match severity {
        IlSeverity::Severe => text.bright_red(),
        IlSeverity::Mild => text.yellow(),
        IlSeverity::None => text.bright_green(),
    }
}

pub fn slippage_cell(impact_pct: f64, severity: SlippageSeverity) -> ColoredString {
    let text = format!("+{:.3}%", impact_pct);
    match severity {
        SlippageSeverity::High => text.bright_red().bold(),
        SlippageSeverity::Moderate => text.yellow().bold(),
        SlippageSeverity::Low => text.bright_green().bold(),
    }
}

/// Sparse overlay column: blank dash when the sample is outside the span
pub fn optional_cell(value: Option<f64>, width: usize) -> String {
    match value {
        Some(v) => format!("{:>width$.2}", v, width = width),
        None => format!("{:>width$}", "-", width = width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag() {
        assert_eq!(Format::from_flag(true), Format::Json);
        assert_eq!(Format::from_flag(false), Format::Table);
    }

    #[test]
    fn test_optional_cell() {
        assert_eq!(optional_cell(Some(12.346), 8), "   12.35");
        assert_eq!(optional_cell(None, 4), "   -");
    }

    #[test]
    fn test_il_cell_text() {
        colored::control::set_override(false);
        assert_eq!(il_cell(-0.2, IlSeverity::Severe, 9).to_string(), "  -20.000%");
    }
}
