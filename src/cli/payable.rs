//! Payable ("to be paid") CLI commands

use clap::Subcommand;

use super::{month_balance_line, parse_amount, parse_month, parse_status};
use crate::config::settings::Settings;
use crate::display::format_payable_list;
use crate::engine;
use crate::error::FinboardResult;
use crate::models::{Money, MonthKey};
use crate::services::{CreatePayableInput, PayableService};
use crate::state::{Command, FinanceState};
use crate::storage::Storage;

/// Payable subcommands
#[derive(Subcommand, Debug)]
pub enum PayableCommands {
    /// Add a bill to pay
    Add {
        /// Amount due
        amount: String,
        /// What the bill is for
        description: String,
        /// Month the bill belongs to (YYYY-MM); defaults to the latest month with records
        #[arg(long)]
        month: Option<String>,
        /// paid, pending or scheduled (defaults to pending)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List bills
    #[command(alias = "ls")]
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Change the status of a bill
    Status {
        /// Payable ID (a prefix is enough)
        id: String,
        /// paid, pending or scheduled
        status: String,
    },
    /// Delete a bill
    #[command(alias = "rm")]
    Delete {
        /// Payable ID
        id: String,
    },
}

/// Handle a payable command
pub fn handle_payable_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PayableCommands,
) -> FinboardResult<()> {
    let service = PayableService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        PayableCommands::Add {
            amount,
            description,
            month,
            status,
        } => {
            let input = CreatePayableInput {
                description,
                amount: parse_amount(&amount)?,
                status: status.as_deref().map(parse_status).transpose()?,
                month: month.as_deref().map(parse_month).transpose()?,
            };

            let before = FinanceState::load(storage)?;
            let payable = service.create(input)?;
            let after = before.apply(Command::AddPayable(payable.clone()));

            println!(
                "Added to be paid in {}: {} {} ({})",
                payable.month,
                payable.item.description,
                payable.item.amount.format_with_symbol(symbol),
                payable.item.id.short()
            );
            println!(
                "Pending this month: {}",
                to_be_paid(&after, payable.month).format_with_symbol(symbol)
            );
            println!("{}", month_balance_line(&after, payable.month, symbol));
        }

        PayableCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let payables = service.list(month)?;
            print!("{}", format_payable_list(&payables, symbol));
        }

        PayableCommands::Status { id, status } => {
            let status = parse_status(&status)?;
            let before = FinanceState::load(storage)?;
            let payable = service.set_status(&id, status)?;
            let after = before.apply(Command::SetPayableStatus {
                id: payable.item.id,
                status,
            });

            println!(
                "{} ({}) is now {}",
                payable.item.description,
                payable.month,
                payable.item.status
            );
            println!(
                "Still to pay in {}: {}",
                payable.month.long_label(),
                to_be_paid(&after, payable.month).format_with_symbol(symbol)
            );
        }

        PayableCommands::Delete { id } => {
            let before = FinanceState::load(storage)?;
            let payable = service.delete(&id)?;
            let after = before.apply(Command::DeletePayable(payable.item.id));

            println!(
                "Deleted bill: {} ({})",
                payable.item.description,
                payable.item.id.short()
            );
            println!("{}", month_balance_line(&after, payable.month, symbol));
        }
    }

    Ok(())
}

/// Pending total of `month` as the dashboard computes it
fn to_be_paid(state: &FinanceState, month: MonthKey) -> Money {
    state
        .month(month)
        .map(|bucket| engine::summarize(bucket).to_be_paid)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatedPayable, PayableItem, TransactionStatus};

    #[test]
    fn test_to_be_paid_skips_paid_items() {
        let january = MonthKey::new(2025, 0);
        let payables = [
            DatedPayable::new(january, PayableItem::new("Water", Money::from_units(150))),
            DatedPayable::new(january, PayableItem::new("Power", Money::from_units(80))),
            DatedPayable::new(
                january,
                PayableItem::new("Internet", Money::from_units(200))
                    .with_status(TransactionStatus::Paid),
            ),
        ];
        let state = FinanceState::from_records(&[], &payables, vec![]);

        assert_eq!(to_be_paid(&state, january), Money::from_units(230));
        assert_eq!(to_be_paid(&state, MonthKey::new(2025, 1)), Money::zero());
    }
}
