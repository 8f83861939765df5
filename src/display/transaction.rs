//! Transaction display formatting

use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use super::format_date;
use super::report::truncate;
use crate::models::{Transaction, TransactionStatus};

fn status_icon(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Paid => "✓",
        TransactionStatus::Pending => "·",
        TransactionStatus::Scheduled => "⏱",
    }
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Method")]
    method: &'static str,
    #[tabled(rename = "Inst.")]
    installments: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Table of transactions; expenses show as negative amounts
pub fn format_transaction_list(
    transactions: &[Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.short(),
        status: status_icon(txn.status),
        date: format_date(txn.date, date_format),
        description: truncate(&txn.description, 28),
        category: truncate(&txn.category, 16),
        method: txn.payment_method.as_str(),
        installments: txn.installments.map(|i| i.to_string()).unwrap_or_default(),
        amount: txn.signed_amount().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());
    format!("{}\n{} transaction(s)\n", table, transactions.len())
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {} ({})\n", txn.id.short(), txn.id));
    output.push_str(&format!("Date:        {}\n", format_date(txn.date, date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Description: {}\n", txn.description));
    if txn.category.is_empty() {
        output.push_str("Category:    (none)\n");
    } else {
        output.push_str(&format!("Category:    {}\n", txn.category));
    }
    output.push_str(&format!("Method:      {}\n", txn.payment_method));
    output.push_str(&format!("Status:      {}\n", txn.status));
    if let Some(installments) = txn.installments {
        output.push_str(&format!("Installment: {}\n", installments));
    }

    output
}
