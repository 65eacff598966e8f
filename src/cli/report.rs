//! Report CLI commands
//!
//! Renders the analytics aggregations as plain terminal tables.

use chrono::Local;
use clap::Subcommand;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::Money;
use crate::reports::{daily_spending, spending_by_category, BudgetSummary};
use crate::services::AccountingService;
use crate::storage::Storage;

use super::budget::parse_date;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Summary of the current budget
    Summary,

    /// Spending by category for the current budget
    Categories,

    /// Daily spending over a date range
    Daily {
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> MoneyTrackResult<()> {
    let service = AccountingService::new(storage);
    let today = Local::now().date_naive();

    match cmd {
        ReportCommands::Summary => {
            let budget = service
                .current_budget()?
                .ok_or_else(|| MoneyTrackError::budget_not_found("active"))?;
            let summary = BudgetSummary::generate(storage, budget.id, today)?;

            println!("Budget Summary ({})", summary.budget.id);
            println!("{}", "=".repeat(50));
            println!(
                "  Period:          {} to {}",
                summary.budget.start_date, summary.budget.end_date
            );
            println!("  Total budget:    {}", summary.budget.total_amount);
            println!(
                "  Total expenses:  {} ({:.2}%)",
                summary.total_expenses, summary.spent_percentage
            );
            println!("  Remaining:       {}", summary.remaining_budget);
            println!("  Transactions:    {}", summary.transaction_count);
            println!("  Daily average:   {}", summary.average_daily_spending);
            if let Some(biggest) = &summary.biggest_expense {
                println!(
                    "  Biggest expense: {} - {}",
                    biggest.amount, biggest.description
                );
            }
        }

        ReportCommands::Categories => {
            let budget = service
                .current_budget()?
                .ok_or_else(|| MoneyTrackError::budget_not_found("active"))?;
            let report = spending_by_category(storage, budget.id)?;

            if report.is_empty() {
                println!("No expenses recorded for the current budget.");
                return Ok(());
            }

            let total: Money = report.values().copied().sum();
            let mut rows: Vec<_> = report.into_iter().collect();
            rows.sort_by(|a, b| b.1.cmp(&a.1));

            println!("Spending by Category");
            println!("{}", "-".repeat(50));
            for (name, amount) in rows {
                println!(
                    "  {:24} {:>12} {:>7.2}%",
                    name,
                    amount.to_string(),
                    amount.percentage_of(total)
                );
            }
            println!("{}", "-".repeat(50));
            println!("  {:24} {:>12}", "TOTAL", total.to_string());
        }

        ReportCommands::Daily { start, end } => {
            let start_date = parse_date(&start)?;
            let end_date = parse_date(&end)?;
            let report = daily_spending(storage, start_date, end_date)?;

            if report.is_empty() {
                println!("No spending between {} and {}.", start_date, end_date);
                return Ok(());
            }

            println!("Daily Spending: {} to {}", start_date, end_date);
            println!("{}", "-".repeat(30));
            let mut total = Money::zero();
            for (day, amount) in &report {
                println!("  {:12} {:>12}", day.to_string(), amount.to_string());
                total += *amount;
            }
            println!("{}", "-".repeat(30));
            println!("  {:12} {:>12}", "TOTAL", total.to_string());
        }
    }

    Ok(())
}
