//! CSV export of transactions

use std::io::Write;

use serde::Serialize;

use crate::error::FinboardResult;
use crate::storage::Storage;

#[derive(Debug, Serialize)]
struct TransactionCsvRow<'a> {
    id: String,
    date: String,
    #[serde(rename = "type")]
    kind: &'static str,
    description: &'a str,
    category: &'a str,
    amount: String,
    payment_method: &'static str,
    status: &'static str,
    installments: String,
}

/// Write all transactions as CSV, oldest first
///
/// Amounts are plain decimals with two places and no currency symbol, so
/// spreadsheets read them as numbers.
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FinboardResult<()> {
    let mut transactions = storage.transactions.get_all()?;
    transactions.sort_by_key(|t| t.date);

    let mut csv_writer = csv::Writer::from_writer(writer);
    for txn in &transactions {
        csv_writer.serialize(TransactionCsvRow {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.as_str(),
            description: &txn.description,
            category: &txn.category,
            amount: format!("{:.2}", txn.amount.as_f64()),
            payment_method: txn.payment_method.as_str(),
            status: txn.status.as_str(),
            installments: txn.installments.map(|i| i.to_string()).unwrap_or_default(),
        })?;
    }
    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinboardPaths;
    use crate::models::{Installments, Money, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_transactions_csv() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(FinboardPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let mut tv = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            Money::from_cents(129_990),
            TransactionKind::Expense,
        )
        .described("TV, 55\"", "Shopping");
        tv.installments = Some(Installments::new(1, 10));
        let salary = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            Money::from_units(3500),
            TransactionKind::Income,
        )
        .described("Salary", "Salary");
        storage.transactions.upsert(tv).unwrap();
        storage.transactions.upsert(salary).unwrap();

        let mut buffer = Vec::new();
        export_transactions_csv(&storage, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "id,date,type,description,category,amount,payment_method,status,installments"
        );
        assert!(lines[1].contains(",2025-01-05,income,Salary,Salary,3500.00,Other,pending,"));
        assert!(lines[2].contains(",2025-02-01,expense,\"TV, 55\"\"\",Shopping,1299.90,Other,pending,1/10"));
    }

    #[test]
    fn test_empty_store_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(FinboardPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut buffer = Vec::new();
        export_transactions_csv(&storage, &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }
}
