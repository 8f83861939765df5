//! Payable item display formatting

use tabled::{settings::Style, Table, Tabled};

use super::report::truncate;
use crate::models::{DatedPayable, Money};

#[derive(Tabled)]
struct PayableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Table of payable items followed by the outstanding (pending) total
pub fn format_payable_list(payables: &[DatedPayable], symbol: &str) -> String {
    if payables.is_empty() {
        return "Nothing to pay.\n".to_string();
    }

    let outstanding: Money = payables
        .iter()
        .filter(|p| p.item.is_outstanding())
        .map(|p| p.item.amount)
        .sum();

    let rows = payables.iter().map(|p| PayableRow {
        id: p.item.id.short(),
        month: p.month.short_label(),
        description: truncate(&p.item.description, 32),
        amount: p.item.amount.format_with_symbol(symbol),
        status: p.item.status.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!(
        "{}\nPending total: {}\n",
        table,
        outstanding.format_with_symbol(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, PayableItem, TransactionStatus};

    #[test]
    fn test_list_and_pending_total() {
        let month = MonthKey::new(2025, 0);
        let payables = vec![
            DatedPayable::new(month, PayableItem::new("Water", Money::from_units(150))),
            DatedPayable::new(month, PayableItem::new("Power", Money::from_units(80))),
            DatedPayable::new(
                month,
                PayableItem::new("Internet", Money::from_units(200))
                    .with_status(TransactionStatus::Paid),
            ),
        ];

        let output = format_payable_list(&payables, "R$");
        assert!(output.contains("Jan/2025"));
        assert!(output.contains("Internet"));
        assert!(output.contains("Paid"));
        assert!(output.contains("Pending total: R$230.00"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_payable_list(&[], "R$"), "Nothing to pay.\n");
    }
}
