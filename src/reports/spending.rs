//! Spending analytics
//!
//! Read-only aggregations over the transaction log. Only expense
//! transactions feed these figures; income and budget audit entries are
//! excluded.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{Budget, BudgetId, Money, Transaction};
use crate::storage::Storage;

/// Total expense spending per category name for a budget
///
/// Transactions without a category (and those whose category was deleted)
/// are grouped under "Uncategorized".
pub fn spending_by_category(
    storage: &Storage,
    budget_id: BudgetId,
) -> MoneyTrackResult<HashMap<String, Money>> {
    let by_id = storage.transactions.sum_expenses_by_category(budget_id)?;
    let names = storage.categories.name_lookup()?;

    let mut by_name: HashMap<String, Money> = HashMap::new();
    for (category_id, amount) in by_id {
        let name = category_id
            .and_then(|id| names.get(&id).cloned())
            .unwrap_or_else(|| "Uncategorized".to_string());
        *by_name.entry(name).or_insert_with(Money::zero) += amount;
    }
    Ok(by_name)
}

/// Total expense spending per local calendar day over a date range (inclusive)
///
/// Days without spending are absent from the map.
pub fn daily_spending(
    storage: &Storage,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> MoneyTrackResult<BTreeMap<NaiveDate, Money>> {
    storage.transactions.sum_expenses_by_day(start_date, end_date)
}

/// Aggregated overview of a single budget
#[derive(Debug, Clone)]
pub struct BudgetSummary {
    pub budget: Budget,
    /// Sum of expense transactions linked to the budget
    pub total_expenses: Money,
    /// Number of expense transactions linked to the budget
    pub transaction_count: usize,
    pub remaining_budget: Money,
    /// Expenses as a percentage of the total, half-up at two decimals
    pub spent_percentage: f64,
    /// Expenses averaged over elapsed days (at least one)
    pub average_daily_spending: Money,
    /// The single largest expense, if any
    pub biggest_expense: Option<Transaction>,
}

impl BudgetSummary {
    /// Build a summary for the given budget as of `today`
    pub fn generate(
        storage: &Storage,
        budget_id: BudgetId,
        today: NaiveDate,
    ) -> MoneyTrackResult<Self> {
        let budget = storage
            .budgets
            .get(budget_id)?
            .ok_or_else(|| MoneyTrackError::budget_not_found(budget_id.to_string()))?;

        let expenses: Vec<Transaction> = storage
            .transactions
            .get_by_budget(budget_id)?
            .into_iter()
            .filter(|t| t.is_expense())
            .collect();

        let total_expenses: Money = expenses.iter().map(|t| t.amount).sum();
        let remaining_budget = budget.total_amount - total_expenses;
        let spent_percentage = total_expenses.percentage_of(budget.total_amount);

        let elapsed_days = (budget.total_days() - budget.remaining_days(today)).max(1);
        let average_daily_spending = total_expenses.divide_round_half_up(elapsed_days)?;

        let biggest_expense = expenses
            .iter()
            .max_by_key(|t| t.amount)
            .cloned();

        Ok(Self {
            transaction_count: expenses.len(),
            budget,
            total_expenses,
            remaining_budget,
            spent_percentage,
            average_daily_spending,
            biggest_expense,
        })
    }
}
