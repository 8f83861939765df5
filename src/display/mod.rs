//! Display formatting for terminal output

use std::fmt::Write;

use chrono::NaiveDate;

pub mod card;
pub mod payable;
pub mod report;
pub mod transaction;

pub use card::format_card_list;
pub use payable::format_payable_list;
pub use transaction::{format_transaction_details, format_transaction_list};

/// Format `date` with a user strftime pattern, falling back to ISO 8601
/// when the pattern cannot render a plain date
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_patterns() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2025-03-07");
        assert_eq!(format_date(date, "%d/%m/%Y"), "07/03/2025");
        assert_eq!(format_date(date, "%b %e"), "Mar  7");
    }

    #[test]
    fn test_format_date_falls_back_on_bad_pattern() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date, "%Q"), "2025-03-07");
        assert_eq!(format_date(date, "%H:%M"), "2025-03-07");
    }
}
