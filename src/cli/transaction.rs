//! Transaction CLI commands

use clap::Subcommand;

use super::{
    month_balance_line, parse_amount, parse_date, parse_installments, parse_kind, parse_method,
    parse_month, parse_status,
};
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{MonthKey, TransactionStatus};
use crate::services::{
    CreateTransactionInput, KindFilter, TransactionFilter, TransactionService,
    UpdateTransactionInput,
};
use crate::state::{Command, FinanceState};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount, always positive (e.g. "1200" or "49,90")
        amount: String,
        /// What the money was for
        description: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Category (see `finboard categories`)
        #[arg(short, long, default_value = "")]
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method (Nubank, Inter, C6 Bank, PAN, Debit, Cash, Other)
        #[arg(short, long)]
        method: Option<String>,
        /// paid, pending or scheduled (defaults to pending)
        #[arg(short, long)]
        status: Option<String>,
        /// Installment position, e.g. 3/10
        #[arg(short, long)]
        installments: Option<String>,
    },
    /// List transactions, newest first
    #[command(alias = "ls")]
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// all, income or expense
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: String,
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show one transaction
    Show {
        /// Transaction ID (a prefix is enough)
        id: String,
    },
    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD); may move the transaction to another month
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        method: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
        /// Installment position, e.g. 4/10
        #[arg(short, long, conflicts_with = "no_installments")]
        installments: Option<String>,
        /// Remove the installment plan
        #[arg(long)]
        no_installments: bool,
    },
    /// Mark a transaction as paid
    Pay {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinboardResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            kind,
            category,
            date,
            method,
            status,
            installments,
        } => {
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => chrono::Local::now().date_naive(),
            };

            let input = CreateTransactionInput {
                date,
                amount: parse_amount(&amount)?,
                description,
                category,
                kind: parse_kind(&kind)?,
                payment_method: method.as_deref().map(parse_method).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                installments: installments.as_deref().map(parse_installments).transpose()?,
            };

            let before = FinanceState::load(storage)?;
            let txn = service.create(input)?;
            let after = before.apply(Command::AddTransaction(txn.clone()));

            println!("Created transaction:");
            print!("{}", format_transaction_details(&txn, symbol, date_format));
            println!();
            println!("{}", month_balance_line(&after, txn.month_key(), symbol));
        }

        TransactionCommands::List {
            month,
            kind,
            category,
            limit,
        } => {
            let kind = KindFilter::parse(&kind).ok_or_else(|| {
                FinboardError::Validation(format!(
                    "Invalid type filter: '{}'. Use all, income or expense",
                    kind
                ))
            })?;

            let mut filter = TransactionFilter::new().kind(kind);
            if let Some(month_str) = month {
                filter = filter.month(parse_month(&month_str)?);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = service.list(&filter)?;
            print!("{}", format_transaction_list(&transactions, symbol, date_format));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinboardError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, symbol, date_format));
        }

        TransactionCommands::Edit {
            id,
            amount,
            description,
            kind,
            category,
            date,
            method,
            status,
            installments,
            no_installments,
        } => {
            let installments = if no_installments {
                Some(None)
            } else {
                installments
                    .as_deref()
                    .map(parse_installments)
                    .transpose()?
                    .map(Some)
            };

            let input = UpdateTransactionInput {
                date: date.as_deref().map(parse_date).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                category,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                payment_method: method.as_deref().map(parse_method).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                installments,
            };

            if input.is_empty() {
                println!("Nothing to change. Pass at least one field to edit.");
                return Ok(());
            }

            let before = FinanceState::load(storage)?;
            let old_month = service
                .find(&id)?
                .ok_or_else(|| FinboardError::transaction_not_found(&id))?
                .month_key();
            let txn = service.update(&id, input)?;
            let after = before.apply(Command::UpdateTransaction(txn.clone()));

            println!("Updated transaction:");
            print!("{}", format_transaction_details(&txn, symbol, date_format));
            println!();
            print_affected_months(&after, old_month, txn.month_key(), symbol);
        }

        TransactionCommands::Pay { id } => {
            let txn = service.set_status(&id, TransactionStatus::Paid)?;
            println!("Marked as paid: {} ({})", txn.description, txn.id.short());
        }

        TransactionCommands::Delete { id } => {
            let before = FinanceState::load(storage)?;
            let txn = service.delete(&id)?;
            let after = before.apply(Command::DeleteTransaction(txn.id));

            println!("Deleted transaction: {} ({})", txn.description, txn.id.short());
            println!("{}", month_balance_line(&after, txn.month_key(), symbol));
        }
    }

    Ok(())
}

fn print_affected_months(state: &FinanceState, old: MonthKey, new: MonthKey, symbol: &str) {
    if old != new {
        println!("Moved from {} to {}", old.long_label(), new.long_label());
        println!("{}", month_balance_line(state, old, symbol));
    }
    println!("{}", month_balance_line(state, new, symbol));
}
