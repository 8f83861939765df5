//! Formatting helpers shared by the terminal reports

use crate::models::Money;

/// Amount with the currency symbol, colored green/red when `color` is set
pub fn format_money(amount: Money, symbol: &str, color: bool) -> String {
    let text = amount.format_with_symbol(symbol);
    if !color {
        return text;
    }
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Percentage with one decimal, e.g. `77.4%`
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Signed percentage with an arrow, e.g. `▲ +50.0%`
pub fn format_trend(pct: f64) -> String {
    if pct > 0.0 {
        format!("▲ +{:.1}%", pct)
    } else if pct < 0.0 {
        format!("▼ {:.1}%", pct)
    } else {
        "= 0.0%".to_string()
    }
}

/// Horizontal bar of `width` cells filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", head)
}
