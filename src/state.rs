//! Finance state snapshot
//!
//! `FinanceState` is the bucketed view of one profile's records together with
//! the credit cards and the month currently selected for the dashboard. It is
//! a plain value: writes are expressed as `Command`s and `apply` returns the
//! next state without touching the previous one.

use serde::Serialize;

use crate::engine::{self, FinancialSummary};
use crate::error::FinboardResult;
use crate::models::{
    CreditCard, DatedPayable, MonthBucket, MonthKey, PayableId, Transaction, TransactionId,
    TransactionStatus,
};
use crate::storage::Storage;

/// A change to the finance state
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTransaction(Transaction),
    /// Replace the transaction with the same id, moving it to another month
    /// when its date changed
    UpdateTransaction(Transaction),
    DeleteTransaction(TransactionId),
    AddPayable(DatedPayable),
    SetPayableStatus {
        id: PayableId,
        status: TransactionStatus,
    },
    DeletePayable(PayableId),
    AddCreditCard(CreditCard),
    UpdateCreditCard(CreditCard),
    /// Select an existing month; unknown months leave the selection alone
    SelectMonth(MonthKey),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinanceState {
    months: Vec<MonthBucket>,
    credit_cards: Vec<CreditCard>,
    current_month_index: Option<usize>,
}

impl FinanceState {
    /// Build the state from decoded records, selecting the latest month
    pub fn from_records(
        transactions: &[Transaction],
        payables: &[DatedPayable],
        credit_cards: Vec<CreditCard>,
    ) -> Self {
        let months = engine::bucket_by_month(transactions, payables);
        let current_month_index = months.len().checked_sub(1);
        Self {
            months,
            credit_cards,
            current_month_index,
        }
    }

    /// Build the state from what `storage` currently holds in memory
    pub fn load(storage: &Storage) -> FinboardResult<Self> {
        Ok(Self::from_records(
            &storage.transactions.get_all()?,
            &storage.payables.get_all()?,
            storage.credit_cards.get_all()?,
        ))
    }

    /// Month buckets in ascending order
    pub fn months(&self) -> &[MonthBucket] {
        &self.months
    }

    pub fn credit_cards(&self) -> &[CreditCard] {
        &self.credit_cards
    }

    pub fn current_month_index(&self) -> Option<usize> {
        self.current_month_index
    }

    pub fn current_month(&self) -> Option<&MonthBucket> {
        self.current_month_index.and_then(|i| self.months.get(i))
    }

    pub fn month(&self, key: MonthKey) -> Option<&MonthBucket> {
        self.position(key).ok().map(|i| &self.months[i])
    }

    /// Most recent month with records, if any
    pub fn latest_month(&self) -> Option<MonthKey> {
        self.months.last().map(|b| b.key)
    }

    /// Summary of the selected month; zeros when nothing is selected
    pub fn current_summary(&self) -> FinancialSummary {
        self.current_month()
            .map(engine::summarize)
            .unwrap_or_default()
    }

    /// Trend of the selected month against the bucket before it
    pub fn current_trend(&self) -> f64 {
        self.current_month_index
            .map(|i| engine::trend_at(&self.months, i))
            .unwrap_or(0.0)
    }

    /// Produce the state that results from `command`
    pub fn apply(&self, command: Command) -> FinanceState {
        let mut next = self.clone();
        next.apply_in_place(command);
        next
    }

    fn apply_in_place(&mut self, command: Command) {
        match command {
            Command::AddTransaction(txn) => {
                let index = self.bucket_index(txn.month_key());
                self.months[index].transactions.push(txn);
            }
            Command::UpdateTransaction(txn) => self.update_transaction(txn),
            Command::DeleteTransaction(id) => {
                for bucket in &mut self.months {
                    bucket.transactions.retain(|t| t.id != id);
                }
            }
            Command::AddPayable(payable) => {
                let index = self.bucket_index(payable.month);
                self.months[index].payables.push(payable.item);
            }
            Command::SetPayableStatus { id, status } => {
                if let Some(item) = self
                    .months
                    .iter_mut()
                    .flat_map(|b| b.payables.iter_mut())
                    .find(|p| p.id == id)
                {
                    item.status = status;
                }
            }
            Command::DeletePayable(id) => {
                for bucket in &mut self.months {
                    bucket.payables.retain(|p| p.id != id);
                }
            }
            Command::AddCreditCard(card) => self.credit_cards.push(card),
            Command::UpdateCreditCard(card) => {
                if let Some(slot) = self.credit_cards.iter_mut().find(|c| c.id == card.id) {
                    *slot = card;
                }
            }
            Command::SelectMonth(key) => {
                if let Ok(index) = self.position(key) {
                    self.current_month_index = Some(index);
                }
            }
        }
    }

    fn update_transaction(&mut self, txn: Transaction) {
        let target = txn.month_key();
        let found = self.months.iter().enumerate().find_map(|(bi, b)| {
            b.transactions
                .iter()
                .position(|t| t.id == txn.id)
                .map(|ti| (bi, ti))
        });

        match found {
            Some((bi, ti)) if self.months[bi].key == target => {
                self.months[bi].transactions[ti] = txn;
            }
            Some((bi, ti)) => {
                self.months[bi].transactions.remove(ti);
                let index = self.bucket_index(target);
                self.months[index].transactions.push(txn);
            }
            None => {}
        }
    }

    fn position(&self, key: MonthKey) -> Result<usize, usize> {
        self.months.binary_search_by_key(&key, |b| b.key)
    }

    /// Index of the bucket for `key`, inserting an empty one in order if needed
    ///
    /// The selection keeps pointing at the same month after an insert. With
    /// no selection yet, the latest month becomes selected.
    fn bucket_index(&mut self, key: MonthKey) -> usize {
        match self.position(key) {
            Ok(index) => index,
            Err(index) => {
                self.months.insert(index, MonthBucket::new(key));
                self.current_month_index = match self.current_month_index {
                    Some(selected) if selected >= index => Some(selected + 1),
                    Some(selected) => Some(selected),
                    None => Some(self.months.len() - 1),
                };
                index
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PayableItem, TransactionKind};
    use chrono::NaiveDate;

    fn txn(y: i32, m: u32, d: u32, units: i64, kind: TransactionKind) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), Money::from_units(units), kind)
            .described("Test", "Other")
    }

    fn state() -> FinanceState {
        FinanceState::from_records(
            &[
                txn(2025, 1, 10, 1000, TransactionKind::Income),
                txn(2025, 3, 10, 1500, TransactionKind::Income),
            ],
            &[],
            vec![],
        )
    }

    #[test]
    fn test_default_selection_is_latest_month() {
        let state = state();
        assert_eq!(state.months().len(), 2);
        assert_eq!(state.current_month().map(|b| b.key), Some(MonthKey::new(2025, 2)));
        assert!((state.current_trend() - 50.0).abs() < 1e-9);
        assert_eq!(FinanceState::default().current_summary(), FinancialSummary::default());
    }

    #[test]
    fn test_apply_does_not_mutate_previous_state() {
        let before = state();
        let after = before.apply(Command::AddTransaction(txn(
            2025,
            3,
            20,
            100,
            TransactionKind::Expense,
        )));

        assert_eq!(before.months()[1].transactions.len(), 1);
        assert_eq!(after.months()[1].transactions.len(), 2);
        assert_eq!(after.current_summary().balance, Money::from_units(1400));
    }

    #[test]
    fn test_new_month_keeps_order_and_selection() {
        let state = state();
        let next = state.apply(Command::AddTransaction(txn(
            2025,
            2,
            1,
            10,
            TransactionKind::Expense,
        )));

        let keys: Vec<_> = next.months().iter().map(|b| b.key).collect();
        assert_eq!(
            keys,
            vec![MonthKey::new(2025, 0), MonthKey::new(2025, 1), MonthKey::new(2025, 2)]
        );
        assert_eq!(next.current_month_index(), Some(2));
        assert_eq!(next.current_month().map(|b| b.key), Some(MonthKey::new(2025, 2)));
    }

    #[test]
    fn test_first_record_selects_its_month() {
        let next = FinanceState::default().apply(Command::AddPayable(DatedPayable::new(
            MonthKey::new(2025, 4),
            PayableItem::new("Rent", Money::from_units(900)),
        )));
        assert_eq!(next.current_month_index(), Some(0));
        assert_eq!(next.current_summary().to_be_paid, Money::from_units(900));
    }

    #[test]
    fn test_update_transaction_relocates_across_months() {
        let original = txn(2025, 1, 10, 200, TransactionKind::Expense);
        let state = FinanceState::from_records(&[original.clone()], &[], vec![]);

        let mut moved = original.clone();
        moved.date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let next = state.apply(Command::UpdateTransaction(moved.clone()));

        let jan = next.month(MonthKey::new(2025, 0)).unwrap();
        let apr = next.month(MonthKey::new(2025, 3)).unwrap();
        assert!(jan.transactions.is_empty());
        assert_eq!(apr.transactions, vec![moved]);
    }

    #[test]
    fn test_update_in_same_month_keeps_position() {
        let a = txn(2025, 1, 1, 10, TransactionKind::Expense);
        let b = txn(2025, 1, 2, 20, TransactionKind::Expense);
        let state = FinanceState::from_records(&[a.clone(), b.clone()], &[], vec![]);

        let mut edited = a.clone();
        edited.amount = Money::from_units(15);
        let next = state.apply(Command::UpdateTransaction(edited));

        let bucket = &next.months()[0];
        assert_eq!(bucket.transactions[0].amount, Money::from_units(15));
        assert_eq!(bucket.transactions[1].id, b.id);
    }

    #[test]
    fn test_delete_leaves_empty_bucket() {
        let only = txn(2025, 6, 1, 10, TransactionKind::Expense);
        let state = FinanceState::from_records(&[only.clone()], &[], vec![]);
        let next = state.apply(Command::DeleteTransaction(only.id));

        assert_eq!(next.months().len(), 1);
        assert!(next.months()[0].is_empty());
        assert_eq!(next.current_summary(), FinancialSummary::default());
    }

    #[test]
    fn test_payable_status_and_delete() {
        let item = PayableItem::new("Water", Money::from_units(150));
        let id = item.id;
        let state = FinanceState::from_records(
            &[],
            &[DatedPayable::new(MonthKey::new(2025, 0), item)],
            vec![],
        );
        assert_eq!(state.current_summary().to_be_paid, Money::from_units(150));

        let paid = state.apply(Command::SetPayableStatus {
            id,
            status: TransactionStatus::Paid,
        });
        assert_eq!(paid.current_summary().to_be_paid, Money::zero());

        let deleted = paid.apply(Command::DeletePayable(id));
        assert!(deleted.months()[0].payables.is_empty());
    }

    #[test]
    fn test_credit_card_commands() {
        let card = CreditCard::new("Nubank", Money::from_units(5000), 10, 3);
        let state = FinanceState::default().apply(Command::AddCreditCard(card.clone()));
        let updated = state.apply(Command::UpdateCreditCard(
            card.clone().with_used(Money::from_units(1000)),
        ));

        assert_eq!(state.credit_cards()[0].used, Money::zero());
        assert_eq!(updated.credit_cards()[0].used, Money::from_units(1000));
    }

    #[test]
    fn test_select_month() {
        let state = state();
        let selected = state.apply(Command::SelectMonth(MonthKey::new(2025, 0)));
        assert_eq!(selected.current_month_index(), Some(0));
        assert_eq!(selected.current_trend(), 0.0);

        let unchanged = selected.apply(Command::SelectMonth(MonthKey::new(2030, 0)));
        assert_eq!(unchanged.current_month_index(), Some(0));
    }
}
