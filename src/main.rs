use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finboard::cli::{
    handle_audit_command, handle_card_command, handle_export_command, handle_payable_command,
    handle_report_command, handle_transaction_command, CardCommands, ExportFormat,
    PayableCommands, ReportCommands, TransactionCommands,
};
use finboard::config::{paths::FinboardPaths, settings::Settings};
use finboard::models::{suggested_categories, TransactionKind};
use finboard::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finboard",
    author = "Kaylee Beyene",
    version,
    about = "Terminal personal-finance tracker",
    long_about = "finboard keeps your income, expenses, bills to pay and credit cards \
                  per month, and shows a monthly dashboard with balance, trend and \
                  spending by category."
)]
struct Cli {
    /// Profile whose records are used
    #[arg(short, long, global = true, env = "FINBOARD_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Bills to pay
    #[command(subcommand, alias = "pay")]
    Payable(PayableCommands),

    /// Credit card commands
    #[command(subcommand)]
    Card(CardCommands),

    /// Dashboard and monthly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the profile's records
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show suggested categories and the ones already in use
    Categories {
        /// Only categories for this type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Only this record kind (transaction, payable, card)
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Create the data directories and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env("FINBOARD_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("finboard=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings live at the base directory, shared by all profiles
    let base_paths = FinboardPaths::new()?;
    let settings = Settings::load_or_create(&base_paths)?;
    init_logging(&settings);

    let profile = cli
        .profile
        .clone()
        .unwrap_or_else(|| settings.default_profile.clone());
    let paths = base_paths.with_profile(&profile)?;

    let storage = Storage::new(paths.clone())?;
    let rejected = storage.load_all()?;
    if rejected > 0 {
        eprintln!(
            "Warning: {} stored record(s) could not be read and were skipped",
            rejected
        );
    }

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Payable(cmd)) => {
            handle_payable_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Card(cmd)) => {
            handle_card_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export {
            format,
            output,
            pretty,
        }) => {
            handle_export_command(&storage, format, output, pretty)?;
        }
        Some(Commands::Categories { kind }) => {
            print_categories(&storage, kind.as_deref())?;
        }
        Some(Commands::Audit { limit, entity }) => {
            handle_audit_command(&storage, limit, entity)?;
        }
        Some(Commands::Init) => {
            println!("Initializing finboard at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Profile '{}' ready in {}", paths.profile(), paths.profile_dir().display());
            println!();
            println!("Run 'finboard transaction add --help' to record your first transaction.");
        }
        Some(Commands::Config) => {
            println!("finboard Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Profile:           {}", paths.profile());
            println!("Profile directory: {}", paths.profile_dir().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Comparison months: {}", settings.comparison_months);
            println!("  Due-soon window:   {} days", settings.due_soon_days);
            println!("  Default profile:   {}", settings.default_profile);
            println!("  Log filter:        {}", settings.log_filter);
        }
        None => {
            println!("finboard - Terminal personal-finance tracker");
            println!();
            println!("Run 'finboard --help' for usage information.");
            println!("Run 'finboard report dashboard' to see the current month.");
        }
    }

    Ok(())
}

fn print_categories(storage: &Storage, kind: Option<&str>) -> Result<()> {
    let kinds = match kind {
        Some(name) => vec![TransactionKind::parse(name).ok_or_else(|| {
            anyhow::anyhow!("Invalid type: '{}'. Use 'income' or 'expense'", name)
        })?],
        None => vec![TransactionKind::Income, TransactionKind::Expense],
    };

    let transactions = storage.transactions.get_all()?;
    for kind in kinds {
        println!("{} categories:", kind);
        for category in suggested_categories(kind) {
            println!("  {}", category);
        }

        let in_use: BTreeSet<&str> = transactions
            .iter()
            .filter(|t| t.kind == kind && !t.category.is_empty())
            .map(|t| t.category.as_str())
            .filter(|c| !suggested_categories(kind).contains(c))
            .collect();
        if !in_use.is_empty() {
            println!("  In use:");
            for category in in_use {
                println!("    {}", category);
            }
        }
        println!();
    }

    Ok(())
}
