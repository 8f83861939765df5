//! Suggested transaction categories
//!
//! Categories are free text on a transaction. These lists only seed the
//! CLI help and the `categories` command.

use super::transaction::TransactionKind;

/// Suggested categories for income transactions
pub const INCOME_CATEGORIES: [&str; 5] = [
    "Salary",
    "Freelance",
    "Investments",
    "Gifts",
    "Other Income",
];

/// Suggested categories for expense transactions
pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "Food",
    "Housing",
    "Transportation",
    "Entertainment",
    "Health",
    "Education",
    "Shopping",
    "Utilities",
    "Travel",
    "Other Expenses",
];

/// Suggested categories for a transaction kind
pub fn suggested_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Whether `category` is one of the suggestions for `kind` (exact match)
pub fn is_suggested(kind: TransactionKind, category: &str) -> bool {
    suggested_categories(kind).contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_by_kind() {
        assert!(is_suggested(TransactionKind::Income, "Salary"));
        assert!(is_suggested(TransactionKind::Expense, "Housing"));
        assert!(!is_suggested(TransactionKind::Expense, "Salary"));
        assert!(!is_suggested(TransactionKind::Expense, "housing"));
    }
}
