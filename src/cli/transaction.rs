//! Transaction listing CLI commands

use clap::Subcommand;

use crate::error::MoneyTrackResult;
use crate::models::TransactionKind;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show expenses
        #[arg(long)]
        expenses: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
) -> MoneyTrackResult<()> {
    match cmd {
        TransactionCommands::List { limit, expenses } => {
            let names = storage.categories.name_lookup()?;
            let txns: Vec<_> = storage
                .transactions
                .get_recent(if expenses { usize::MAX } else { limit })?
                .into_iter()
                .filter(|t| !expenses || t.is_expense())
                .take(limit)
                .collect();

            if txns.is_empty() {
                println!("No transactions yet.");
                return Ok(());
            }

            println!(
                "{:14} {:12} {:>12} {:18} {:20}",
                "ID", "Type", "Amount", "Category", "Description"
            );
            println!("{}", "-".repeat(80));
            for txn in txns {
                let category = match txn.kind {
                    TransactionKind::Expense => txn
                        .category_id
                        .and_then(|id| names.get(&id).cloned())
                        .unwrap_or_else(|| "Uncategorized".to_string()),
                    _ => String::new(),
                };
                println!(
                    "{:14} {:12} {:>12} {:18} {:20}",
                    txn.id.to_string(),
                    txn.kind.to_string(),
                    txn.amount.to_string(),
                    category,
                    txn.description
                );
            }
        }
    }

    Ok(())
}
