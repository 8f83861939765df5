//! Expense breakdown by category

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::percentage_of;
use crate::models::{Money, MonthBucket};

/// Total spent in one category and its share of the month's expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub amount: Money,
    /// Share of the month's total expenses, 0-100
    pub percentage: f64,
}

/// Break a month's expenses down by category
///
/// Categories are compared as exact strings. Entries are sorted by amount,
/// largest first; equal amounts keep the order in which their category was
/// first seen. Income never appears here.
pub fn category_breakdown(bucket: &MonthBucket) -> Vec<CategorySummary> {
    let mut order: Vec<(&str, Money)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in bucket.transactions.iter().filter(|t| t.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&i) => order[i].1 += txn.amount,
            None => {
                index.insert(txn.category.as_str(), order.len());
                order.push((txn.category.as_str(), txn.amount));
            }
        }
    }

    let total_expenses: Money = order.iter().map(|(_, amount)| *amount).sum();

    let mut summaries: Vec<CategorySummary> = order
        .into_iter()
        .map(|(category, amount)| CategorySummary {
            category: category.to_string(),
            amount,
            percentage: percentage_of(amount.cents(), total_expenses.cents()),
        })
        .collect();

    // sort_by is stable
    summaries.sort_by(|a, b| b.amount.cmp(&a.amount));
    summaries
}
