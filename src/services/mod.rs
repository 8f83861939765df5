//! Service layer for finboard
//!
//! Services validate input, persist through the storage layer and append to
//! the audit log. Each returns the record as it was stored.

pub mod credit_card;
pub mod payable;
pub mod transaction;

pub use credit_card::{CreateCreditCardInput, CreditCardService, UpdateCreditCardInput};
pub use payable::{CreatePayableInput, PayableService};
pub use transaction::{
    CreateTransactionInput, KindFilter, TransactionFilter, TransactionService,
    UpdateTransactionInput,
};
