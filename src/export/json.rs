//! JSON export of a whole profile

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine;
use crate::error::{FinboardError, FinboardResult};
use crate::models::Money;
use crate::storage::{CreditCardRow, PayableRow, StoredRecord, Storage, TransactionRow};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything in one profile, as stored rows plus derived monthly totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub profile: String,
    pub transactions: Vec<TransactionRow>,
    pub to_be_paid: Vec<PayableRow>,
    pub credit_cards: Vec<CreditCardRow>,
    pub months: Vec<MonthTotals>,
    pub metadata: ExportMetadata,
}

/// Summary figures of one month, amounts in currency units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTotals {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub to_be_paid: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub payable_count: usize,
    pub credit_card_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
    pub total_income: f64,
    pub total_expenses: f64,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> FinboardResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let payables = storage.payables.get_all()?;
        let credit_cards = storage.credit_cards.get_all()?;

        let months = engine::bucket_by_month(&transactions, &payables)
            .iter()
            .map(|bucket| {
                let summary = engine::summarize(bucket);
                MonthTotals {
                    month: bucket.key.to_string(),
                    income: summary.income.as_f64(),
                    expenses: summary.expenses.as_f64(),
                    balance: summary.balance.as_f64(),
                    to_be_paid: summary.to_be_paid.as_f64(),
                }
            })
            .collect();

        let total_income: Money = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let total_expenses: Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            payable_count: payables.len(),
            credit_card_count: credit_cards.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
            total_income: total_income.as_f64(),
            total_expenses: total_expenses.as_f64(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            profile: storage.paths().profile().to_string(),
            transactions: transactions.iter().map(StoredRecord::to_row).collect(),
            to_be_paid: payables.iter().map(StoredRecord::to_row).collect(),
            credit_cards: credit_cards.iter().map(StoredRecord::to_row).collect(),
            months,
            metadata,
        })
    }
}

pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FinboardResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinboardError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinboardPaths;
    use crate::models::{
        CreditCard, DatedPayable, MonthKey, PayableItem, Transaction, TransactionKind,
    };
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        for (day, units, kind) in [
            (5, 3500, TransactionKind::Income),
            (10, 1200, TransactionKind::Expense),
            (12, 350, TransactionKind::Expense),
        ] {
            storage
                .transactions
                .upsert(
                    Transaction::new(
                        NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                        Money::from_units(units),
                        kind,
                    )
                    .described("Entry", "Other"),
                )
                .unwrap();
        }
        storage
            .payables
            .upsert(DatedPayable::new(
                MonthKey::new(2025, 0),
                PayableItem::new("Water", Money::from_units(150)),
            ))
            .unwrap();
        storage
            .credit_cards
            .upsert(CreditCard::new("Nubank", Money::from_units(5000), 10, 3))
            .unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.profile, "default");
        assert_eq!(export.transactions.len(), 3);
        assert_eq!(export.metadata.payable_count, 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-05"));
        assert_eq!(export.metadata.total_expenses, 1550.0);
        assert_eq!(export.months.len(), 1);
        assert_eq!(export.months[0].month, "2025-01");
        assert_eq!(export.months[0].balance, 1950.0);
        assert_eq!(export.months[0].to_be_paid, 150.0);
    }

    #[test]
    fn test_json_uses_stored_row_shape() {
        let (_temp_dir, storage) = create_test_storage();
        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["transactions"][0]["type"], "income");
        assert_eq!(value["to_be_paid"][0]["month"], 0);
        assert_eq!(value["credit_cards"][0]["due_date"], 10);

        let row = value["transactions"][1].clone();
        assert!(Transaction::decode(row).is_ok());
    }
}
