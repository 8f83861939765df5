//! One line per month with records

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::display::report::format_trend;
use crate::engine::{self, FinancialSummary};
use crate::models::MonthKey;
use crate::state::FinanceState;

#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    pub month: MonthKey,
    pub transactions: usize,
    pub payables: usize,
    pub summary: FinancialSummary,
    pub trend: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthsReport {
    pub rows: Vec<MonthRow>,
}

#[derive(Tabled)]
struct MonthTableRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Txns")]
    transactions: usize,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "To be paid")]
    to_be_paid: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

impl MonthsReport {
    pub fn generate(state: &FinanceState) -> Self {
        let months = state.months();
        let rows = months
            .iter()
            .enumerate()
            .map(|(i, bucket)| MonthRow {
                month: bucket.key,
                transactions: bucket.transactions.len(),
                payables: bucket.payables.len(),
                summary: engine::summarize(bucket),
                trend: engine::trend_at(months, i),
            })
            .collect();
        Self { rows }
    }

    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.rows.is_empty() {
            return "No months with records yet.\n".to_string();
        }

        let rows: Vec<MonthTableRow> = self
            .rows
            .iter()
            .map(|row| MonthTableRow {
                month: row.month.short_label(),
                transactions: row.transactions,
                income: row.summary.income.format_with_symbol(symbol),
                expenses: row.summary.expenses.format_with_symbol(symbol),
                balance: row.summary.balance.format_with_symbol(symbol),
                to_be_paid: row.summary.to_be_paid.format_with_symbol(symbol),
                trend: format_trend(row.trend),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        format!("{}\n", table)
    }
}
