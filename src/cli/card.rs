//! Credit card CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_day};
use crate::config::settings::Settings;
use crate::display::format_card_list;
use crate::error::FinboardResult;
use crate::models::Money;
use crate::services::{CreateCreditCardInput, CreditCardService, UpdateCreditCardInput};
use crate::state::{Command, FinanceState};
use crate::storage::Storage;

/// Credit card subcommands
#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Register a credit card
    Add {
        /// Card name, e.g. "Nubank"
        name: String,
        /// Credit limit
        #[arg(short, long)]
        limit: String,
        /// Day of month the bill is due
        #[arg(short, long)]
        due: u32,
        /// Day of month the statement closes
        #[arg(short, long)]
        closing: u32,
        /// Amount already used
        #[arg(short, long)]
        used: Option<String>,
    },
    /// List cards with utilization and due dates
    #[command(alias = "ls")]
    List,
    /// Change a card
    Edit {
        /// Card name or ID
        card: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        limit: Option<String>,
        #[arg(short, long)]
        used: Option<String>,
        #[arg(short, long)]
        due: Option<u32>,
        #[arg(short, long)]
        closing: Option<u32>,
    },
}

/// Handle a credit card command
pub fn handle_card_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CardCommands,
) -> FinboardResult<()> {
    let service = CreditCardService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let today = chrono::Local::now().date_naive();

    match cmd {
        CardCommands::Add {
            name,
            limit,
            due,
            closing,
            used,
        } => {
            let input = CreateCreditCardInput {
                name,
                credit_limit: parse_amount(&limit)?,
                used: used
                    .as_deref()
                    .map(parse_amount)
                    .transpose()?
                    .unwrap_or_else(Money::zero),
                due_day: parse_day(due, "due day")?,
                closing_day: parse_day(closing, "closing day")?,
            };

            let state = FinanceState::load(storage)?;
            let card = service.create(input)?;
            let state = state.apply(Command::AddCreditCard(card.clone()));

            println!("Added card: {}", card.name);
            print!(
                "{}",
                format_card_list(state.credit_cards(), symbol, today, settings.due_soon_days)
            );
        }

        CardCommands::List => {
            let cards = service.list()?;
            print!(
                "{}",
                format_card_list(&cards, symbol, today, settings.due_soon_days)
            );

            let due_soon = service.due_soon(today, settings.due_soon_days)?;
            if !due_soon.is_empty() {
                let names: Vec<&str> = due_soon.iter().map(|c| c.name.as_str()).collect();
                println!(
                    "Due within {} days: {}",
                    settings.due_soon_days,
                    names.join(", ")
                );
            }
        }

        CardCommands::Edit {
            card,
            name,
            limit,
            used,
            due,
            closing,
        } => {
            let input = UpdateCreditCardInput {
                name,
                credit_limit: limit.as_deref().map(parse_amount).transpose()?,
                used: used.as_deref().map(parse_amount).transpose()?,
                due_day: due.map(|d| parse_day(d, "due day")).transpose()?,
                closing_day: closing.map(|d| parse_day(d, "closing day")).transpose()?,
            };

            let state = FinanceState::load(storage)?;
            let updated = service.update(&card, input)?;
            let state = state.apply(Command::UpdateCreditCard(updated.clone()));

            println!("Updated card: {}", updated.name);
            print!(
                "{}",
                format_card_list(state.credit_cards(), symbol, today, settings.due_soon_days)
            );
        }
    }

    Ok(())
}
