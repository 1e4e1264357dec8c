//! Report formatting utilities for terminal output

use crate::models::Money;

/// Format an amount green when non-negative and red when negative
///
/// Colour codes are only emitted when `color` is set, so piped output stays
/// plain.
pub fn format_money_colored(amount: Money, symbol: &str, color: bool) -> String {
    let text = amount.format_with_symbol(symbol);
    if !color {
        return text;
    }
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else {
        format!("\x1b[32m{}\x1b[0m", text)
    }
}

/// Format a percentage with one decimal place, as the pie chart labels do
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// A horizontal bar `width` cells wide, filled in proportion to `value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
