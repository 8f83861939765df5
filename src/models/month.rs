//! Month keys and month buckets
//!
//! A `MonthKey` is a calendar (year, month) pair with a zero-based month,
//! matching how stored payable rows carry their month. A `MonthBucket` owns
//! the records that fall into one key.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::payable::PayableItem;
use super::transaction::Transaction;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English name of a zero-based month
pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES.get(month0 as usize).copied().unwrap_or("Unknown")
}

/// Calendar month identifier; ordering is by year, then month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// Zero-based month, 0 = January
    pub month: u32,
}

impl MonthKey {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Key of the month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Key of the current local month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Parse the `YYYY-MM` form, where MM is one-based as people write it
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let invalid = || MonthParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self::new(year, month - 1))
    }

    pub fn is_valid(&self) -> bool {
        self.month < 12
    }

    /// First day of the month, if the key is valid
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Short chart label, e.g. `Jan/2025`
    pub fn short_label(&self) -> String {
        let name = self.name();
        format!("{}/{}", &name[..name.len().min(3)], self.year)
    }

    /// Long label, e.g. `January 2025`
    pub fn long_label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Error for malformed `YYYY-MM` input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month '{}': use YYYY-MM (e.g. 2025-01)", self.0)
    }
}

impl std::error::Error for MonthParseError {}

/// All records associated with one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub transactions: Vec<Transaction>,
    pub payables: Vec<PayableItem>,
}

impl MonthBucket {
    pub fn new(key: MonthKey) -> Self {
        Self {
            key,
            transactions: Vec::new(),
            payables: Vec::new(),
        }
    }

    pub fn with_records(key: MonthKey, transactions: Vec<Transaction>, payables: Vec<PayableItem>) -> Self {
        Self {
            key,
            transactions,
            payables,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.payables.is_empty()
    }
}
