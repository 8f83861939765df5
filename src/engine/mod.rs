//! Monthly aggregation engine
//!
//! Pure functions over in-memory records: group them into month buckets and
//! derive per-month figures for the dashboard. Nothing here performs I/O or
//! mutates its input, so every function is safe to call from any thread.
//!
//! Division by zero never raises; percentages and trends fall back to 0.

mod breakdown;
mod bucket;
mod comparison;
mod summary;
mod trend;

pub use breakdown::{category_breakdown, CategorySummary};
pub use bucket::bucket_by_month;
pub use comparison::{month_comparison, MonthComparison};
pub use summary::{summarize, FinancialSummary};
pub use trend::{trend, trend_at};

/// `part` as a percentage of `whole`, or 0 when `whole` is zero
pub(crate) fn percentage_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
