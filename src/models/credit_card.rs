//! Credit card model
//!
//! Cards are tracked independently of spending: `used` is entered by hand
//! and is never derived from transactions.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CreditCardId;
use super::money::Money;

/// A credit card with its billing cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CreditCardId,

    /// Display name, usually the issuer (e.g. "Nubank")
    pub name: String,

    /// Credit limit; always positive
    pub credit_limit: Money,

    /// Amount currently used; may exceed the limit
    pub used: Money,

    /// Day of month the bill is due (1-31)
    pub due_day: u32,

    /// Day of month the statement closes (1-31)
    pub closing_day: u32,
}

impl CreditCard {
    /// Create a card with a fresh id and nothing used
    pub fn new(name: impl Into<String>, credit_limit: Money, due_day: u32, closing_day: u32) -> Self {
        Self {
            id: CreditCardId::new(),
            name: name.into(),
            credit_limit,
            used: Money::zero(),
            due_day,
            closing_day,
        }
    }

    pub fn with_used(mut self, used: Money) -> Self {
        self.used = used;
        self
    }

    /// Limit minus used; negative when the card is over its limit
    pub fn available(&self) -> Money {
        self.credit_limit - self.used
    }

    /// Share of the limit in use, as a percentage
    pub fn utilization(&self) -> f64 {
        if self.credit_limit.is_zero() {
            return 0.0;
        }
        self.used.cents() as f64 / self.credit_limit.cents() as f64 * 100.0
    }

    pub fn is_over_limit(&self) -> bool {
        self.used > self.credit_limit
    }

    /// Next due date on or after `today`
    ///
    /// A due day past the end of a short month rolls into the following
    /// month (day 31 in April is May 1st).
    pub fn next_due_date(&self, today: NaiveDate) -> NaiveDate {
        let (year, month) = if self.due_day < today.day() {
            if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            }
        } else {
            (today.year(), today.month())
        };
        day_in_month(year, month, self.due_day)
    }

    /// Whole days from `today` until the next due date
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.next_due_date(today) - today).num_days()
    }

    /// Whether the bill falls due within `window_days`
    pub fn is_due_soon(&self, today: NaiveDate, window_days: i64) -> bool {
        self.days_until_due(today) <= window_days
    }

    pub fn validate(&self) -> Result<(), CreditCardValidationError> {
        if self.name.trim().is_empty() {
            return Err(CreditCardValidationError::EmptyName);
        }
        if !self.credit_limit.is_positive() {
            return Err(CreditCardValidationError::NonPositiveLimit(self.credit_limit));
        }
        if self.used.is_negative() {
            return Err(CreditCardValidationError::NegativeUsed(self.used));
        }
        if !(1..=31).contains(&self.due_day) {
            return Err(CreditCardValidationError::InvalidDay {
                field: "due day",
                day: self.due_day,
            });
        }
        if !(1..=31).contains(&self.closing_day) {
            return Err(CreditCardValidationError::InvalidDay {
                field: "closing day",
                day: self.closing_day,
            });
        }
        Ok(())
    }
}

fn day_in_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    first + Duration::days(i64::from(day.max(1)) - 1)
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} of {})", self.name, self.used, self.credit_limit)
    }
}

/// Validation errors for credit cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditCardValidationError {
    EmptyName,
    NonPositiveLimit(Money),
    NegativeUsed(Money),
    InvalidDay { field: &'static str, day: u32 },
}

impl fmt::Display for CreditCardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Card name cannot be empty"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Credit limit must be positive ({})", limit)
            }
            Self::NegativeUsed(used) => write!(f, "Used amount cannot be negative ({})", used),
            Self::InvalidDay { field, day } => {
                write!(f, "Invalid {}: {} (must be 1-31)", field, day)
            }
        }
    }
}

impl std::error::Error for CreditCardValidationError {}
