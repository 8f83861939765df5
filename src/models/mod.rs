//! Core data models for finboard
//!
//! Transactions, payable items, credit cards and the month buckets that
//! group them, plus the `Money` and id types they share.

pub mod category;
pub mod credit_card;
pub mod ids;
pub mod money;
pub mod month;
pub mod payable;
pub mod transaction;

pub use category::{suggested_categories, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use credit_card::{CreditCard, CreditCardValidationError};
pub use ids::{CreditCardId, PayableId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::{month_name, MonthBucket, MonthKey, MonthParseError};
pub use payable::{DatedPayable, PayableItem, PayableValidationError};
pub use transaction::{
    Installments, PaymentMethod, Transaction, TransactionKind, TransactionStatus,
    TransactionValidationError,
};
