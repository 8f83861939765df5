//! Per-month financial summary

use serde::{Deserialize, Serialize};

use crate::models::{Money, MonthBucket, TransactionKind};

/// Income, expenses and outstanding bills for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub income: Money,
    pub expenses: Money,
    /// income minus expenses; negative when the month overspent
    pub balance: Money,
    /// Sum of payable items still pending; paid and scheduled items excluded
    pub to_be_paid: Money,
}

/// Summarize one month bucket
pub fn summarize(bucket: &MonthBucket) -> FinancialSummary {
    let total = |kind: TransactionKind| -> Money {
        bucket
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };

    let income = total(TransactionKind::Income);
    let expenses = total(TransactionKind::Expense);

    let to_be_paid = bucket
        .payables
        .iter()
        .filter(|p| p.is_outstanding())
        .map(|p| p.amount)
        .sum();

    FinancialSummary {
        income,
        expenses,
        balance: income - expenses,
        to_be_paid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, PayableItem, Transaction, TransactionStatus};
    use chrono::NaiveDate;

    fn bucket() -> MonthBucket {
        MonthBucket::new(MonthKey::new(2025, 0))
    }

    fn txn(units: i64, kind: TransactionKind) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            Money::from_units(units),
            kind,
        )
    }

    #[test]
    fn test_empty_bucket_is_all_zero() {
        assert_eq!(summarize(&bucket()), FinancialSummary::default());
    }

    #[test]
    fn test_income_expenses_balance() {
        let mut b = bucket();
        b.transactions = vec![
            txn(3500, TransactionKind::Income),
            txn(1200, TransactionKind::Expense).described("Rent", "Housing"),
            txn(350, TransactionKind::Expense).described("Market", "Food"),
        ];

        let summary = summarize(&b);
        assert_eq!(summary.income, Money::from_units(3500));
        assert_eq!(summary.expenses, Money::from_units(1550));
        assert_eq!(summary.balance, Money::from_units(1950));
        assert_eq!(summary.to_be_paid, Money::zero());
        assert_eq!(summary.balance, summary.income - summary.expenses);
    }

    #[test]
    fn test_negative_balance() {
        let mut b = bucket();
        b.transactions = vec![
            txn(100, TransactionKind::Income),
            txn(250, TransactionKind::Expense),
        ];
        assert_eq!(summarize(&b).balance, Money::from_units(-150));
    }

    #[test]
    fn test_to_be_paid_counts_pending_only() {
        let mut b = bucket();
        b.payables = vec![
            PayableItem::new("Water", Money::from_units(150)),
            PayableItem::new("Power", Money::from_units(80)),
            PayableItem::new("Rent", Money::from_units(200)).with_status(TransactionStatus::Paid),
            PayableItem::new("Gym", Money::from_units(90)).with_status(TransactionStatus::Scheduled),
        ];

        let summary = summarize(&b);
        assert_eq!(summary.to_be_paid, Money::from_units(230));
        assert_eq!(summary.income, Money::zero());
        assert_eq!(summary.balance, Money::zero());
    }

    #[test]
    fn test_transaction_status_does_not_affect_totals() {
        let mut b = bucket();
        let mut scheduled = txn(40, TransactionKind::Expense);
        scheduled.status = TransactionStatus::Scheduled;
        b.transactions = vec![scheduled];
        assert_eq!(summarize(&b).expenses, Money::from_units(40));
    }
}
