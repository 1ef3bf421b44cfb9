//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No items found".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
    }
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Format an amount in rupees
pub fn format_money(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// Format a completion percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Color a meeting or task status
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "scheduled" => status.yellow().to_string(),
        "confirmed" | "completed" | "sent" => status.green().to_string(),
        "cancelled" => status.red().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "₹1234.50");
        assert_eq!(format_money(0.0), "₹0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(33.333), "33.33%");
    }
}
