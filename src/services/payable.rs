//! Payable ("to be paid") service

use tracing::debug;

use crate::audit::{generate_diff, EntityType};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{DatedPayable, Money, MonthKey, PayableItem, TransactionStatus};
use crate::storage::{StoredRecord, Storage};

pub struct PayableService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreatePayableInput {
    pub description: String,
    pub amount: Money,
    pub status: Option<TransactionStatus>,
    /// Month to file the item under; see `PayableService::default_month`
    pub month: Option<MonthKey>,
}

fn label(payable: &DatedPayable) -> Option<String> {
    Some(format!("{} {}", payable.month, payable.item.description))
}

impl<'a> PayableService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Month a new item goes to when none is given
    ///
    /// The most recent month holding any transaction or payable, or the
    /// current calendar month when there are no records at all.
    pub fn default_month(&self) -> FinboardResult<MonthKey> {
        let latest_txn = self
            .storage
            .transactions
            .get_all()?
            .iter()
            .map(|t| t.month_key())
            .max();
        let latest_payable = self.storage.payables.get_all()?.iter().map(|p| p.month).max();

        Ok(latest_txn
            .max(latest_payable)
            .unwrap_or_else(MonthKey::current))
    }

    pub fn create(&self, input: CreatePayableInput) -> FinboardResult<DatedPayable> {
        let month = match input.month {
            Some(month) => month,
            None => self.default_month()?,
        };
        if !month.is_valid() {
            return Err(FinboardError::Validation(format!(
                "Month {} is outside 0-11",
                month.month
            )));
        }

        let mut item = PayableItem::new(input.description.trim(), input.amount);
        if let Some(status) = input.status {
            item.status = status;
        }
        item.validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        let payable = DatedPayable::new(month, item);
        self.storage.payables.upsert(payable.clone())?;
        self.storage.payables.save()?;
        debug!(id = %payable.item.id, %month, "created payable");

        self.storage.log_create(
            EntityType::Payable,
            payable.item.id.to_string(),
            label(&payable),
            &payable.to_row(),
        )?;

        Ok(payable)
    }

    pub fn find(&self, identifier: &str) -> FinboardResult<Option<DatedPayable>> {
        self.storage.payables.find(identifier)
    }

    fn require(&self, identifier: &str) -> FinboardResult<DatedPayable> {
        self.find(identifier)?
            .ok_or_else(|| FinboardError::payable_not_found(identifier))
    }

    /// Items filed under `month`, or all items, in stored order
    pub fn list(&self, month: Option<MonthKey>) -> FinboardResult<Vec<DatedPayable>> {
        let mut payables = self.storage.payables.get_all()?;
        if let Some(month) = month {
            payables.retain(|p| p.month == month);
        }
        payables.sort_by_key(|p| p.month);
        Ok(payables)
    }

    pub fn set_status(
        &self,
        identifier: &str,
        status: TransactionStatus,
    ) -> FinboardResult<DatedPayable> {
        let before = self.require(identifier)?;
        let mut payable = before.clone();
        payable.item.status = status;

        self.storage.payables.upsert(payable.clone())?;
        self.storage.payables.save()?;

        let before_row = before.to_row();
        let after_row = payable.to_row();
        let diff = generate_diff(
            &serde_json::to_value(&before_row)?,
            &serde_json::to_value(&after_row)?,
        );
        self.storage.log_update(
            EntityType::Payable,
            payable.item.id.to_string(),
            label(&payable),
            &before_row,
            &after_row,
            diff,
        )?;

        Ok(payable)
    }

    pub fn delete(&self, identifier: &str) -> FinboardResult<DatedPayable> {
        let payable = self.require(identifier)?;

        self.storage.payables.delete(payable.item.id)?;
        self.storage.payables.save()?;

        self.storage.log_delete(
            EntityType::Payable,
            payable.item.id.to_string(),
            label(&payable),
            &payable.to_row(),
        )?;

        Ok(payable)
    }
}
