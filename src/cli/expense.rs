//! Expense CLI commands
//!
//! Expenses are linked to the current active budget by default, so every
//! recorded amount immediately shows up in the budget's spent figure.

use clap::Subcommand;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{CategoryId, Money, TransactionId};
use crate::services::AccountingService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "10" or "10.50")
        amount: String,
        /// Description
        description: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Record without linking to the current budget
        #[arg(long)]
        no_budget: bool,
    },

    /// Edit an existing expense
    Edit {
        /// Transaction ID (full or short form, e.g. "txn-1a2b3c4d")
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> MoneyTrackResult<()> {
    let service = AccountingService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            notes,
            no_budget,
        } => {
            let amount = Money::parse(&amount)?;
            let category_id = match category {
                Some(name) => Some(resolve_category(storage, &name)?),
                None => None,
            };
            let budget_id = if no_budget {
                None
            } else {
                service.current_budget()?.map(|b| b.id)
            };

            let txn = service.record_expense(amount, description, category_id, notes, budget_id)?;

            println!("Recorded expense {}: {} - {}", txn.id, txn.amount, txn.description);
            if let Some(budget_id) = budget_id {
                let budget = service.get_budget(budget_id)?;
                println!(
                    "Budget: {} spent of {} ({:.2}%)",
                    budget.spent_amount,
                    budget.total_amount,
                    budget.spent_percentage()
                );
            } else {
                println!("Not linked to any budget.");
            }
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            notes,
        } => {
            let txn = resolve_transaction(storage, &id)?;

            let new_amount = match amount {
                Some(s) => Money::parse(&s)?,
                None => txn.amount,
            };
            let new_description = description.unwrap_or_else(|| txn.description.clone());
            let new_category = match category {
                Some(name) => Some(resolve_category(storage, &name)?),
                None => txn.category_id,
            };
            let new_notes = notes.unwrap_or_else(|| txn.notes.clone());

            let txn = service.update_transaction(
                txn.id,
                new_amount,
                new_description,
                new_category,
                new_notes,
            )?;

            println!("Updated {}: {} - {}", txn.id, txn.amount, txn.description);
        }

        ExpenseCommands::Delete { id } => {
            let txn = resolve_transaction(storage, &id)?;
            service.delete_transaction(txn.id)?;
            println!("Deleted {}: {} - {}", txn.id, txn.amount, txn.description);
        }
    }

    Ok(())
}

/// Resolve a category by exact name
pub(crate) fn resolve_category(storage: &Storage, name: &str) -> MoneyTrackResult<CategoryId> {
    storage
        .categories
        .get_by_name(name)?
        .map(|c| c.id)
        .ok_or_else(|| MoneyTrackError::category_not_found(name))
}

/// Resolve a transaction by full UUID or short displayed form
pub(crate) fn resolve_transaction(
    storage: &Storage,
    id: &str,
) -> MoneyTrackResult<crate::models::Transaction> {
    if let Ok(parsed) = id.parse::<TransactionId>() {
        if let Some(txn) = storage.transactions.get(parsed)? {
            return Ok(txn);
        }
    }

    // Short form: match against the start of the UUID
    let short = id.strip_prefix("txn-").unwrap_or(id);
    let matches: Vec<_> = storage
        .transactions
        .get_recent(usize::MAX)?
        .into_iter()
        .filter(|t| t.id.as_uuid().to_string().starts_with(short))
        .collect();

    if matches.len() > 1 {
        return Err(MoneyTrackError::Validation(format!(
            "Transaction ID '{}' is ambiguous ({} matches); use a longer prefix",
            id,
            matches.len()
        )));
    }
    matches
        .into_iter()
        .next()
        .ok_or_else(|| MoneyTrackError::transaction_not_found(id))
}
