//! Budget CLI commands
//!
//! Implements CLI commands for the budget lifecycle: setting a new budget,
//! inspecting the current one, and redistributing the daily allowance.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{Budget, BudgetStatus, Money};
use crate::services::AccountingService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a new budget, completing the current one
    Set {
        /// Total amount (e.g., "1000" or "1000.00")
        amount: String,
        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Show the current active budget
    Show,

    /// List all budgets
    List,

    /// Mark the current budget as completed
    Complete,

    /// Redistribute the remaining amount over the remaining days
    Recalculate,
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> MoneyTrackResult<()> {
    let service = AccountingService::new(storage);
    let today = Local::now().date_naive();

    match cmd {
        BudgetCommands::Set {
            amount,
            start,
            end,
            description,
        } => {
            let total = Money::parse(&amount)?;
            let start_date = match start {
                Some(s) => parse_date(&s)?,
                None => today,
            };
            let end_date = parse_date(&end)?;

            let budget = service.create_budget(total, start_date, end_date, description)?;

            println!("Budget set: {} over {} days", budget.total_amount, budget.total_days());
            println!("  Period:       {} to {}", budget.start_date, budget.end_date);
            println!("  Daily budget: {}", budget.daily_budget);
        }

        BudgetCommands::Show => match service.current_budget()? {
            Some(budget) => print_budget(&budget, today),
            None => {
                println!("No active budget.");
                println!("Run 'moneytrack budget set <amount> --end <date>' to create one.");
            }
        },

        BudgetCommands::List => {
            let budgets = service.list_budgets()?;
            if budgets.is_empty() {
                println!("No budgets yet.");
                return Ok(());
            }

            println!(
                "{:14} {:>12} {:>12} {:12} {:12} {:10}",
                "ID", "Total", "Spent", "Start", "End", "Status"
            );
            println!("{}", "-".repeat(76));
            for budget in budgets {
                println!(
                    "{:14} {:>12} {:>12} {:12} {:12} {:10}",
                    budget.id.to_string(),
                    budget.total_amount.to_string(),
                    budget.spent_amount.to_string(),
                    budget.start_date.to_string(),
                    budget.end_date.to_string(),
                    budget.status.to_string()
                );
            }
        }

        BudgetCommands::Complete => {
            let current = service.current_budget()?;
            service.complete_current_budget()?;
            match current {
                Some(budget) => println!("Budget {} marked as completed.", budget.id),
                None => println!("No active budget to complete."),
            }
        }

        BudgetCommands::Recalculate => {
            let budget = service
                .current_budget()?
                .ok_or_else(|| MoneyTrackError::budget_not_found("active"))?;
            let budget = service.recalculate_daily_budget(budget.id, today)?;

            if budget.remaining_days(today) == 0 {
                println!("Budget period has ended; daily budget left unchanged.");
            } else {
                println!(
                    "Daily budget recalculated: {} per day for the remaining {} days.",
                    budget.daily_budget,
                    budget.remaining_days(today)
                );
            }
        }
    }

    Ok(())
}

fn print_budget(budget: &Budget, today: NaiveDate) {
    println!("Current Budget ({})", budget.id);
    println!("{}", "=".repeat(50));
    if !budget.description.is_empty() {
        println!("  Description:  {}", budget.description);
    }
    println!("  Period:       {} to {}", budget.start_date, budget.end_date);
    println!("  Total:        {}", budget.total_amount);
    println!(
        "  Spent:        {} ({:.2}%)",
        budget.spent_amount,
        budget.spent_percentage()
    );
    println!("  Remaining:    {}", budget.remaining_amount());
    println!("  Daily budget: {}", budget.daily_budget);
    println!(
        "  Days left:    {} of {}",
        budget.remaining_days(today),
        budget.total_days()
    );
    if budget.status != BudgetStatus::Active {
        println!("  Status:       {}", budget.status);
    }
    if budget.is_over_budget() {
        println!();
        println!("⚠️  Over budget by {}", budget.remaining_amount().abs());
    }
}

pub(crate) fn parse_date(s: &str) -> MoneyTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| MoneyTrackError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}
