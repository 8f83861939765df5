//! Month bucketing

use std::collections::BTreeMap;

use crate::models::{DatedPayable, MonthBucket, MonthKey, Transaction};

/// Group transactions and payable items into month buckets
///
/// A transaction lands in the month of its date; a payable item in the month
/// it carries. Buckets exist only for months with at least one record and
/// come back sorted by (year, month). Records keep their input order within
/// a bucket.
pub fn bucket_by_month(transactions: &[Transaction], payables: &[DatedPayable]) -> Vec<MonthBucket> {
    let mut months: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();

    for txn in transactions {
        let key = txn.month_key();
        months
            .entry(key)
            .or_insert_with(|| MonthBucket::new(key))
            .transactions
            .push(txn.clone());
    }

    for payable in payables {
        months
            .entry(payable.month)
            .or_insert_with(|| MonthBucket::new(payable.month))
            .payables
            .push(payable.item.clone());
    }

    months.into_values().collect()
}
