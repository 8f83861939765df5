//! Payable ("to be paid") items
//!
//! Bills and other obligations tracked apart from the transaction ledger.
//! An item's only date signal is the month it was filed under, so the store
//! hands them out as `DatedPayable` values carrying that month explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PayableId;
use super::money::Money;
use super::month::MonthKey;
use super::transaction::TransactionStatus;

/// An obligation to pay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayableItem {
    pub id: PayableId,
    pub description: String,
    pub amount: Money,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl PayableItem {
    /// Create a new pending item with a fresh id
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            id: PayableId::new(),
            description: description.into(),
            amount,
            status: TransactionStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// Only pending items count toward the month's outstanding total
    pub fn is_outstanding(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn validate(&self) -> Result<(), PayableValidationError> {
        if self.amount.is_negative() {
            return Err(PayableValidationError::NegativeAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(PayableValidationError::EmptyDescription);
        }
        Ok(())
    }
}

impl fmt::Display for PayableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.description, self.amount, self.status)
    }
}

/// A payable item together with the month it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPayable {
    pub month: MonthKey,
    pub item: PayableItem,
}

impl DatedPayable {
    pub fn new(month: MonthKey, item: PayableItem) -> Self {
        Self { month, item }
    }
}

/// Validation errors for payable items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayableValidationError {
    NegativeAmount(Money),
    EmptyDescription,
}

impl fmt::Display for PayableValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Payable amount cannot be negative ({})", amount)
            }
            Self::EmptyDescription => write!(f, "Payable description cannot be empty"),
        }
    }
}

impl std::error::Error for PayableValidationError {}
