//! Multi-month income/expense comparison

use serde::{Deserialize, Serialize};

use super::summary::summarize;
use crate::models::{Money, MonthBucket, MonthKey};

/// Income and expenses of one month, for side-by-side charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub month: MonthKey,
    /// Short label such as `Jan/2025`
    pub label: String,
    pub income: Money,
    pub expenses: Money,
}

/// The last `count` buckets in ascending order with their totals
pub fn month_comparison(buckets: &[MonthBucket], count: usize) -> Vec<MonthComparison> {
    let start = buckets.len().saturating_sub(count);
    buckets[start..]
        .iter()
        .map(|bucket| {
            let summary = summarize(bucket);
            MonthComparison {
                month: bucket.key,
                label: bucket.key.short_label(),
                income: summary.income,
                expenses: summary.expenses,
            }
        })
        .collect()
}
