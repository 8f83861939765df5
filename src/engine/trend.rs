//! Month-over-month balance trend

use super::summary::summarize;
use crate::models::MonthBucket;

/// Percentage change in balance from `previous` to `current`
///
/// Returns 0 when there is no previous bucket or its balance is zero, so a
/// move away from a zero balance reads as flat. Positive means the balance
/// improved.
pub fn trend(current: &MonthBucket, previous: Option<&MonthBucket>) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };

    let previous_balance = summarize(previous).balance.cents();
    if previous_balance == 0 {
        return 0.0;
    }

    let current_balance = summarize(current).balance.cents();
    (current_balance - previous_balance) as f64 / previous_balance.abs() as f64 * 100.0
}

/// Trend of the bucket at `index` against the bucket sorted just before it
///
/// "Previous" is positional: if months are missing from `buckets`, the
/// comparison is against whichever month precedes in the list. Returns 0 for
/// the first bucket or an index out of range.
pub fn trend_at(buckets: &[MonthBucket], index: usize) -> f64 {
    match buckets.get(index) {
        Some(current) => trend(current, index.checked_sub(1).and_then(|i| buckets.get(i))),
        None => 0.0,
    }
}
