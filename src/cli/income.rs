//! Income CLI commands

use clap::Subcommand;

use crate::error::MoneyTrackResult;
use crate::models::Money;
use crate::services::AccountingService;
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record an income transaction
    Add {
        /// Amount (e.g., "2500" or "2500.00")
        amount: String,
        /// Description
        description: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
}

/// Handle an income command
pub fn handle_income_command(storage: &Storage, cmd: IncomeCommands) -> MoneyTrackResult<()> {
    let service = AccountingService::new(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            description,
            notes,
        } => {
            let amount = Money::parse(&amount)?;
            let txn = service.record_income(amount, description, notes)?;
            println!("Recorded income {}: {} - {}", txn.id, txn.amount, txn.description);
            println!("Income is tracked for records only and does not extend the budget.");
        }
    }

    Ok(())
}
