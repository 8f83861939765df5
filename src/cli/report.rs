//! CLI commands for reports

use std::io::IsTerminal;

use clap::Subcommand;

use super::parse_month;
use crate::config::settings::Settings;
use crate::error::FinboardResult;
use crate::reports::{DashboardOptions, DashboardReport, MonthsReport};
use crate::state::FinanceState;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Summary, trend and breakdown of one month
    #[command(alias = "dash")]
    Dashboard {
        /// Month to show (YYYY-MM); defaults to the latest month with records
        #[arg(short, long)]
        month: Option<String>,

        /// How many months the comparison covers
        #[arg(long = "months")]
        comparison_months: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// One line per month with records
    Months,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinboardResult<()> {
    let state = FinanceState::load(storage)?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Dashboard {
            month,
            comparison_months,
            json,
        } => {
            let options = DashboardOptions {
                month: month.as_deref().map(parse_month).transpose()?,
                comparison_months: comparison_months.unwrap_or(settings.comparison_months),
                due_soon_days: settings.due_soon_days,
                today: chrono::Local::now().date_naive(),
            };
            let report = DashboardReport::generate(&state, options);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let color = std::io::stdout().is_terminal();
                print!("{}", report.format_terminal(symbol, color));
            }
        }

        ReportCommands::Months => {
            let report = MonthsReport::generate(&state);
            print!("{}", report.format_terminal(symbol));
        }
    }

    Ok(())
}
