use anyhow::Result;
use clap::{Parser, Subcommand};

use moneytrack::cli::{
    handle_budget_command, handle_category_command, handle_expense_command, handle_income_command,
    handle_report_command, handle_transaction_command,
};
use moneytrack::config::{paths::MoneyTrackPaths, settings::Settings};
use moneytrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "moneytrack",
    version,
    about = "Terminal-based personal budgeting application",
    long_about = "MoneyTrack is a terminal-based personal budgeting application. \
                  Set a budget for a date range, record your expenses against it, \
                  and let it tell you how much you can spend per day."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management commands
    #[command(subcommand)]
    Budget(moneytrack::cli::BudgetCommands),

    /// Expense recording commands
    #[command(subcommand, alias = "exp")]
    Expense(moneytrack::cli::ExpenseCommands),

    /// Income recording commands
    #[command(subcommand)]
    Income(moneytrack::cli::IncomeCommands),

    /// Transaction listing commands
    #[command(subcommand, alias = "txn")]
    Transaction(moneytrack::cli::TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(moneytrack::cli::CategoryCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(moneytrack::cli::ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MoneyTrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, cmd)?;
        }
        Some(Commands::Config) => {
            println!("MoneyTrack Configuration");
            println!("========================");
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Schema version:  {}", settings.schema_version);
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
        None => {
            println!("MoneyTrack - Terminal-based personal budgeting");
            println!();
            println!("Run 'moneytrack --help' for usage information.");
            println!("Run 'moneytrack budget show' to see the current budget.");
        }
    }

    Ok(())
}
