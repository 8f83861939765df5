//! Credit card display formatting

use chrono::NaiveDate;
use tabled::{settings::Style, Table, Tabled};

use super::report::{format_bar, format_percentage};
use crate::models::CreditCard;

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Card")]
    name: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Closes")]
    closing_day: u32,
    #[tabled(rename = "Due")]
    due: String,
}

fn due_label(card: &CreditCard, today: NaiveDate, due_soon_days: i64) -> String {
    let days = card.days_until_due(today);
    let when = match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    };
    if days <= due_soon_days {
        format!("day {} ({}) !", card.due_day, when)
    } else {
        format!("day {} ({})", card.due_day, when)
    }
}

/// Table of cards with utilization bars; cards due soon are flagged with `!`
pub fn format_card_list(
    cards: &[CreditCard],
    symbol: &str,
    today: NaiveDate,
    due_soon_days: i64,
) -> String {
    if cards.is_empty() {
        return "No credit cards.\n".to_string();
    }

    let rows = cards.iter().map(|card| CardRow {
        name: card.name.clone(),
        limit: card.credit_limit.format_with_symbol(symbol),
        used: card.used.format_with_symbol(symbol),
        available: card.available().format_with_symbol(symbol),
        utilization: format!(
            "{} {}",
            format_bar(card.utilization(), 100.0, 10),
            format_percentage(card.utilization())
        ),
        closing_day: card.closing_day,
        due: due_label(card, today, due_soon_days),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let mut output = format!("{}\n", table);
    for card in cards.iter().filter(|c| c.is_over_limit()) {
        output.push_str(&format!(
            "Warning: {} is over its limit by {}\n",
            card.name,
            (-card.available()).format_with_symbol(symbol)
        ));
    }
    output
}
