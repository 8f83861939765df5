//! Monthly dashboard report
//!
//! Everything the dashboard shows for one month: the four summary figures,
//! the trend against the previous bucket, the expense breakdown, the bills
//! still to pay, the recent months side by side, and cards due soon.

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::report::{format_bar, format_money, format_percentage, format_trend, separator};
use crate::engine::{self, CategorySummary, FinancialSummary, MonthComparison};
use crate::models::{CreditCard, Money, MonthBucket, MonthKey, PayableItem};
use crate::state::{Command, FinanceState};

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// A card whose bill is due within the configured window
#[derive(Debug, Clone, Serialize)]
pub struct CardDue {
    pub name: String,
    pub days_until_due: i64,
    pub used: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub month: MonthKey,
    /// False when the month has no bucket; figures are then all zero
    pub has_records: bool,
    pub summary: FinancialSummary,
    pub trend: f64,
    pub categories: Vec<CategorySummary>,
    pub payables: Vec<PayableItem>,
    pub comparison: Vec<MonthComparison>,
    pub cards_due: Vec<CardDue>,
}

/// Knobs for report generation, normally taken from `Settings`
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub month: Option<MonthKey>,
    pub comparison_months: usize,
    pub due_soon_days: i64,
    pub today: NaiveDate,
}

impl DashboardReport {
    /// Build the dashboard for `options.month`, or the state's selected month
    pub fn generate(state: &FinanceState, options: DashboardOptions) -> Self {
        let state = match options.month {
            Some(month) => state.apply(Command::SelectMonth(month)),
            None => state.clone(),
        };
        let month = options
            .month
            .or_else(|| state.current_month().map(|b| b.key))
            .unwrap_or_else(|| MonthKey::from_date(options.today));

        let selected = state.current_month().filter(|b| b.key == month);
        let empty = MonthBucket::new(month);
        let bucket = selected.unwrap_or(&empty);

        let mut cards: Vec<&CreditCard> = state
            .credit_cards()
            .iter()
            .filter(|c| c.is_due_soon(options.today, options.due_soon_days))
            .collect();
        cards.sort_by_key(|c| c.days_until_due(options.today));

        Self {
            month,
            has_records: selected.is_some(),
            summary: engine::summarize(bucket),
            trend: if selected.is_some() { state.current_trend() } else { 0.0 },
            categories: engine::category_breakdown(bucket),
            payables: bucket.payables.clone(),
            comparison: engine::month_comparison(state.months(), options.comparison_months),
            cards_due: cards
                .into_iter()
                .map(|c| CardDue {
                    name: c.name.clone(),
                    days_until_due: c.days_until_due(options.today),
                    used: c.used,
                })
                .collect(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str, color: bool) -> String {
        let money = |m| format_money(m, symbol, color);
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.month.long_label()));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        if !self.has_records {
            output.push_str("No records for this month.\n");
        }
        output.push_str(&format!("{:<14} {:>20}\n", "Income:", money(self.summary.income)));
        output.push_str(&format!("{:<14} {:>20}\n", "Expenses:", money(-self.summary.expenses)));
        output.push_str(&format!("{:<14} {:>20}\n", "Balance:", money(self.summary.balance)));
        output.push_str(&format!("{:<14} {:>20}\n", "To be paid:", money(self.summary.to_be_paid)));
        output.push_str(&format!("{:<14} {:>20}\n", "Trend:", format_trend(self.trend)));

        if !self.categories.is_empty() {
            output.push_str("\nExpenses by category\n");
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for category in &self.categories {
                output.push_str(&format!(
                    "{:<18} {:>14} {} {:>6}\n",
                    category.category,
                    category.amount.format_with_symbol(symbol),
                    format_bar(category.percentage, 100.0, BAR_WIDTH),
                    format_percentage(category.percentage)
                ));
            }
        }

        if !self.payables.is_empty() {
            output.push_str("\nTo be paid\n");
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for item in &self.payables {
                output.push_str(&format!(
                    "{:<30} {:>14} {:>10}\n",
                    item.description,
                    item.amount.format_with_symbol(symbol),
                    item.status
                ));
            }
        }

        if !self.comparison.is_empty() {
            let max = self
                .comparison
                .iter()
                .flat_map(|c| [c.income, c.expenses])
                .max()
                .map(|m| m.as_f64())
                .unwrap_or(0.0);

            output.push_str(&format!("\nLast {} months\n", self.comparison.len()));
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for month in &self.comparison {
                output.push_str(&format!(
                    "{:<9} in  {} {:>14}\n",
                    month.label,
                    format_bar(month.income.as_f64(), max, BAR_WIDTH),
                    month.income.format_with_symbol(symbol)
                ));
                output.push_str(&format!(
                    "{:<9} out {} {:>14}\n",
                    "",
                    format_bar(month.expenses.as_f64(), max, BAR_WIDTH),
                    month.expenses.format_with_symbol(symbol)
                ));
            }
        }

        if !self.cards_due.is_empty() {
            output.push_str("\nCards due soon\n");
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for card in &self.cards_due {
                let when = match card.days_until_due {
                    0 => "today".to_string(),
                    1 => "in 1 day".to_string(),
                    n => format!("in {} days", n),
                };
                output.push_str(&format!(
                    "{:<20} {:>14} due {}\n",
                    card.name,
                    card.used.format_with_symbol(symbol),
                    when
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatedPayable, Transaction, TransactionKind, TransactionStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(d: NaiveDate, units: i64, kind: TransactionKind, category: &str) -> Transaction {
        Transaction::new(d, Money::from_units(units), kind).described("x", category)
    }

    fn options(month: Option<MonthKey>) -> DashboardOptions {
        DashboardOptions {
            month,
            comparison_months: 6,
            due_soon_days: 5,
            today: date(2025, 2, 6),
        }
    }

    fn sample_state() -> FinanceState {
        FinanceState::from_records(
            &[
                txn(date(2024, 12, 5), 1000, TransactionKind::Income, "Salary"),
                txn(date(2025, 1, 5), 3500, TransactionKind::Income, "Salary"),
                txn(date(2025, 1, 10), 1200, TransactionKind::Expense, "Housing"),
                txn(date(2025, 1, 12), 350, TransactionKind::Expense, "Food"),
            ],
            &[
                DatedPayable::new(
                    MonthKey::new(2025, 0),
                    PayableItem::new("Water", Money::from_units(150)),
                ),
                DatedPayable::new(
                    MonthKey::new(2025, 0),
                    PayableItem::new("Internet", Money::from_units(200))
                        .with_status(TransactionStatus::Paid),
                ),
            ],
            vec![
                CreditCard::new("Nubank", Money::from_units(5000), 10, 3),
                CreditCard::new("Inter", Money::from_units(3000), 28, 20),
            ],
        )
    }

    #[test]
    fn test_generate_for_latest_month() {
        let report = DashboardReport::generate(&sample_state(), options(None));

        assert_eq!(report.month, MonthKey::new(2025, 0));
        assert!(report.has_records);
        assert_eq!(report.summary.income, Money::from_units(3500));
        assert_eq!(report.summary.expenses, Money::from_units(1550));
        assert_eq!(report.summary.balance, Money::from_units(1950));
        assert_eq!(report.summary.to_be_paid, Money::from_units(150));
        assert!((report.trend - 95.0).abs() < 1e-9);
        assert_eq!(report.categories[0].category, "Housing");
        assert_eq!(report.comparison.len(), 2);
        assert_eq!(report.cards_due.len(), 1);
        assert_eq!(report.cards_due[0].days_until_due, 4);
    }

    #[test]
    fn test_generate_for_earlier_month() {
        let report =
            DashboardReport::generate(&sample_state(), options(Some(MonthKey::new(2024, 11))));
        assert_eq!(report.summary.balance, Money::from_units(1000));
        assert_eq!(report.trend, 0.0);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn test_generate_for_month_without_records() {
        let report =
            DashboardReport::generate(&sample_state(), options(Some(MonthKey::new(2023, 5))));
        assert!(!report.has_records);
        assert_eq!(report.summary, FinancialSummary::default());
        assert!(report.format_terminal("R$", false).contains("No records for this month."));
    }

    #[test]
    fn test_format_terminal() {
        let output = DashboardReport::generate(&sample_state(), options(None)).format_terminal("R$", false);

        assert!(output.contains("Dashboard: January 2025"));
        assert!(output.contains("R$3,500.00"));
        assert!(output.contains("-R$1,550.00"));
        assert!(output.contains("▲ +95.0%"));
        assert!(output.contains("77.4%"));
        assert!(output.contains("22.6%"));
        assert!(output.contains("Water"));
        assert!(output.contains("Jan/2025"));
        assert!(output.contains("Nubank"));
        assert!(output.contains("due in 4 days"));
    }
}
