//! Transaction service
//!
//! Validates and persists transactions, and writes the audit trail for every
//! change.

use chrono::NaiveDate;
use tracing::debug;

use crate::audit::{generate_diff, EntityType};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{
    Installments, Money, MonthKey, PaymentMethod, Transaction, TransactionKind, TransactionStatus,
};
use crate::storage::{StoredRecord, Storage};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Which kinds of transaction a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.is_income(),
            Self::Expense => txn.is_expense(),
        }
    }
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub month: Option<MonthKey>,
    pub kind: KindFilter,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<TransactionStatus>,
    pub installments: Option<Installments>,
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<TransactionStatus>,
    /// `Some(None)` clears the installment plan
    pub installments: Option<Option<Installments>>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.kind.is_none()
            && self.payment_method.is_none()
            && self.status.is_none()
            && self.installments.is_none()
    }
}

fn label(txn: &Transaction) -> Option<String> {
    Some(format!("{} {}", txn.date, txn.description))
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create, persist and audit a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinboardResult<Transaction> {
        let mut txn = Transaction::new(input.date, input.amount, input.kind)
            .described(input.description.trim(), input.category.trim());
        if let Some(method) = input.payment_method {
            txn.payment_method = method;
        }
        if let Some(status) = input.status {
            txn.status = status;
        }
        txn.installments = input.installments;

        txn.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        debug!(id = %txn.id, month = %txn.month_key(), "created transaction");

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            label(&txn),
            &txn.to_row(),
        )?;

        Ok(txn)
    }

    /// Find a transaction by full or short id
    pub fn find(&self, identifier: &str) -> FinboardResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    fn require(&self, identifier: &str) -> FinboardResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FinboardError::transaction_not_found(identifier))
    }

    /// List transactions, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FinboardResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| filter.month.map_or(true, |m| t.month_key() == m))
            .filter(|t| filter.kind.matches(t))
            .filter(|t| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| t.category.eq_ignore_ascii_case(c))
            })
            .collect();

        // stable: same-day entries stay in stored order
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Apply `input` to the transaction named by `identifier`
    pub fn update(
        &self,
        identifier: &str,
        input: UpdateTransactionInput,
    ) -> FinboardResult<Transaction> {
        let before = self.require(identifier)?;
        let mut txn = before.clone();

        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(category) = input.category {
            txn.category = category.trim().to_string();
        }
        if let Some(kind) = input.kind {
            txn.kind = kind;
        }
        if let Some(method) = input.payment_method {
            txn.payment_method = method;
        }
        if let Some(status) = input.status {
            txn.status = status;
        }
        if let Some(installments) = input.installments {
            txn.installments = installments;
        }

        txn.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        let before_row = before.to_row();
        let after_row = txn.to_row();
        let diff = generate_diff(
            &serde_json::to_value(&before_row)?,
            &serde_json::to_value(&after_row)?,
        );
        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            label(&txn),
            &before_row,
            &after_row,
            diff,
        )?;

        Ok(txn)
    }

    pub fn set_status(
        &self,
        identifier: &str,
        status: TransactionStatus,
    ) -> FinboardResult<Transaction> {
        self.update(
            identifier,
            UpdateTransactionInput {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Delete a transaction, returning the removed record
    pub fn delete(&self, identifier: &str) -> FinboardResult<Transaction> {
        let txn = self.require(identifier)?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            label(&txn),
            &txn.to_row(),
        )?;

        Ok(txn)
    }

    pub fn count(&self) -> FinboardResult<usize> {
        self.storage.transactions.count()
    }
}
