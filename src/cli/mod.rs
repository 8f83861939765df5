//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod card;
pub mod export;
pub mod payable;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use card::{handle_card_command, CardCommands};
pub use export::{handle_export_command, ExportFormat};
pub use payable::{handle_payable_command, PayableCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::engine;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{
    Installments, MonthKey, Money, PaymentMethod, TransactionKind, TransactionStatus,
};
use crate::state::FinanceState;

pub(crate) fn parse_amount(input: &str) -> FinboardResult<Money> {
    Money::parse(input).map_err(|e| {
        FinboardError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '50.00' or '100'. Error: {}",
            input, e
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> FinboardResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FinboardError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}

pub(crate) fn parse_month(input: &str) -> FinboardResult<MonthKey> {
    MonthKey::parse(input).map_err(|_| {
        FinboardError::Validation(format!("Invalid month: '{}'. Use YYYY-MM", input))
    })
}

pub(crate) fn parse_kind(input: &str) -> FinboardResult<TransactionKind> {
    TransactionKind::parse(input).ok_or_else(|| {
        FinboardError::Validation(format!(
            "Invalid type: '{}'. Use 'income' or 'expense'",
            input
        ))
    })
}

pub(crate) fn parse_method(input: &str) -> FinboardResult<PaymentMethod> {
    PaymentMethod::parse(input).ok_or_else(|| {
        let known: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.as_str()).collect();
        FinboardError::Validation(format!(
            "Unknown payment method: '{}'. Known methods: {}",
            input,
            known.join(", ")
        ))
    })
}

pub(crate) fn parse_status(input: &str) -> FinboardResult<TransactionStatus> {
    TransactionStatus::parse(input).ok_or_else(|| {
        FinboardError::Validation(format!(
            "Invalid status: '{}'. Use 'paid', 'pending' or 'scheduled'",
            input
        ))
    })
}

pub(crate) fn parse_installments(input: &str) -> FinboardResult<Installments> {
    Installments::parse(input).ok_or_else(|| {
        FinboardError::Validation(format!(
            "Invalid installments: '{}'. Use CURRENT/TOTAL, e.g. 3/10",
            input
        ))
    })
}

pub(crate) fn parse_day(input: u32, field: &str) -> FinboardResult<u32> {
    if (1..=31).contains(&input) {
        Ok(input)
    } else {
        Err(FinboardError::Validation(format!(
            "Invalid {}: {}. Use a day between 1 and 31",
            field, input
        )))
    }
}

/// One-line balance of `month` as it stands in `state`
pub(crate) fn month_balance_line(state: &FinanceState, month: MonthKey, symbol: &str) -> String {
    let summary = state.month(month).map(engine::summarize).unwrap_or_default();
    format!(
        "{}: income {}, expenses {}, balance {}",
        month.long_label(),
        summary.income.format_with_symbol(symbol),
        summary.expenses.format_with_symbol(symbol),
        summary.balance.format_with_symbol(symbol),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionKind};

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("1299,90").unwrap(), Money::from_cents(129_990));
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert_eq!(parse_month("2025-02").unwrap(), MonthKey::new(2025, 1));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_date("05/01/2025").is_err());
        assert_eq!(parse_kind("Income").unwrap(), TransactionKind::Income);
        assert_eq!(parse_method("c6bank").unwrap(), PaymentMethod::C6Bank);
        assert!(parse_method("Amex").is_err());
        assert_eq!(parse_installments("3/10").unwrap(), Installments::new(3, 10));
        assert!(parse_day(0, "due day").is_err());
        assert_eq!(parse_day(31, "due day").unwrap(), 31);
    }

    #[test]
    fn test_month_balance_line() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let salary = Transaction::new(date, Money::from_units(3500), TransactionKind::Income)
            .described("Salary", "Salary");
        let state = FinanceState::default()
            .apply(crate::state::Command::AddTransaction(salary));

        let line = month_balance_line(&state, MonthKey::new(2025, 0), "R$");
        assert_eq!(
            line,
            "January 2025: income R$3,500.00, expenses R$0.00, balance R$3,500.00"
        );

        let empty = month_balance_line(&state, MonthKey::new(2025, 5), "R$");
        assert!(empty.ends_with("balance R$0.00"));
    }
}
