//! Transaction model
//!
//! Income and expense records with a payment method, a settlement status
//! and optional installment information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::month::MonthKey;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse a kind from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "receita" => Some(Self::Income),
            "expense" | "out" | "despesa" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Wire name used in stored rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// The instrument a transaction was paid with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    Nubank,
    Inter,
    #[serde(rename = "C6 Bank")]
    C6Bank,
    #[serde(rename = "PAN")]
    Pan,
    Debit,
    Cash,
    #[default]
    Other,
}

impl PaymentMethod {
    /// All payment methods in display order
    pub const ALL: [PaymentMethod; 7] = [
        Self::Nubank,
        Self::Inter,
        Self::C6Bank,
        Self::Pan,
        Self::Debit,
        Self::Cash,
        Self::Other,
    ];

    /// Parse a payment method (case-insensitive, spaces optional)
    pub fn parse(s: &str) -> Option<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|method| {
            method
                .as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
                == wanted
        })
    }

    /// Name as stored and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nubank => "Nubank",
            Self::Inter => "Inter",
            Self::C6Bank => "C6 Bank",
            Self::Pan => "PAN",
            Self::Debit => "Debit",
            Self::Cash => "Cash",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status shared by transactions and payable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Paid,
    /// Still outstanding
    #[default]
    Pending,
    /// Outstanding but already arranged (e.g. automatic debit)
    Scheduled,
}

impl TransactionStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "pago" => Some(Self::Paid),
            "pending" | "pendente" => Some(Self::Pending),
            "scheduled" | "agendado" => Some(Self::Scheduled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Pending => write!(f, "Pending"),
            Self::Scheduled => write!(f, "Scheduled"),
        }
    }
}

/// Position of a purchase within an installment plan, e.g. 3 of 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installments {
    pub current: u32,
    pub total: u32,
}

impl Installments {
    pub fn new(current: u32, total: u32) -> Self {
        Self { current, total }
    }

    /// Parse the `3/10` form used on the command line
    pub fn parse(s: &str) -> Option<Self> {
        let (current, total) = s.trim().split_once('/')?;
        Some(Self {
            current: current.trim().parse().ok()?,
            total: total.trim().parse().ok()?,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.current >= 1 && self.current <= self.total
    }
}

impl fmt::Display for Installments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount, never negative; the direction comes from `kind`
    pub amount: Money,

    pub description: String,

    /// Free-form category, usually one of the suggested ones
    pub category: String,

    pub kind: TransactionKind,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub status: TransactionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Installments>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(date: NaiveDate, amount: Money, kind: TransactionKind) -> Self {
        Self::with_id(TransactionId::new(), date, amount, kind)
    }

    /// Create a transaction for an id the store already assigned
    pub fn with_id(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            description: String::new(),
            category: String::new(),
            kind,
            payment_method: PaymentMethod::default(),
            status: TransactionStatus::default(),
            installments: None,
        }
    }

    /// Set description and category in one go
    pub fn described(mut self, description: impl Into<String>, category: impl Into<String>) -> Self {
        self.description = description.into();
        self.category = category.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The month bucket this transaction belongs to
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Amount signed by kind: positive for income, negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if let Some(installments) = self.installments {
            if !installments.is_valid() {
                return Err(TransactionValidationError::InvalidInstallments(installments));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    EmptyDescription,
    InvalidInstallments(Installments),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Transaction amount cannot be negative ({})", amount)
            }
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::InvalidInstallments(installments) => write!(
                f,
                "Installment {} is invalid: current must be between 1 and the total",
                installments
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
