//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Width of the longer bar in [`render_bar_chart`].
pub const CHART_WIDTH: usize = 40;

/// Formats and prints output based on the specified format.
///
/// `Minimal` prints the first row as compact JSON.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a single serializable value.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats a dollar amount with thousands separators: `$12,345.67`.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}

/// Formats a loss as a negative delta: `-$5,000.00 (-50.00%)`.
pub fn format_loss_delta(loss: f64, loss_pct: f64) -> String {
    format!("-{} (-{:.2}%)", format_money(loss), loss_pct)
}

/// Formats a fraction as a percentage with two decimals.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Formats a value with two decimals.
pub fn format_2dp(value: f64) -> String {
    format!("{:.2}", value)
}

/// Renders baseline vs stressed as two horizontal bars.
///
/// The baseline bar is [`CHART_WIDTH`] cells; the stressed bar is scaled to it.
pub fn render_bar_chart(baseline: f64, stressed: f64) -> String {
    let filled = if baseline > 0.0 {
        ((stressed / baseline).clamp(0.0, 1.0) * CHART_WIDTH as f64).round() as usize
    } else {
        0
    };

    let base_bar = "█".repeat(CHART_WIDTH);
    let stressed_bar = format!("{}{}", "█".repeat(filled), "░".repeat(CHART_WIDTH - filled));

    format!(
        "{:<9} {} {}\n{:<9} {} {}",
        "Baseline",
        base_bar.blue(),
        format_money(baseline),
        "Stressed",
        stressed_bar.red(),
        format_money(stressed),
    )
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as money.
    pub fn money(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_money(value))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(60).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.999), "$1,000.00");
        assert_eq!(format_money(100_000.0), "$100,000.00");
        assert_eq!(format_money(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_money(-5_000.0), "-$5,000.00");
    }

    #[test]
    fn test_format_loss_delta() {
        assert_eq!(format_loss_delta(5_000.0, 50.0), "-$5,000.00 (-50.00%)");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.125), "12.50%");
    }

    #[test]
    fn test_bar_chart_scales() {
        colored::control::set_override(false);
        let chart = render_bar_chart(100.0, 50.0);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), CHART_WIDTH);
        assert_eq!(lines[1].matches('█').count(), CHART_WIDTH / 2);
        assert_eq!(lines[1].matches('░').count(), CHART_WIDTH / 2);
        assert!(lines[1].ends_with("$50.00"));
    }
}
