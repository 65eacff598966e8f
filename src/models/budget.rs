//! Budget model
//!
//! A budget covers a contiguous date range with a fixed total amount. The
//! daily budget is the even per-day allowance, recomputed from the remaining
//! amount and remaining days as spending occurs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use crate::error::{MoneyTrackError, MoneyTrackResult};

/// Status of a budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Currently accepting expenses
    #[default]
    Active,
    /// Closed, either explicitly or by creating a replacement
    Completed,
    /// Past its end date without being completed
    Expired,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

/// A budget period with a total amount and daily allowance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Total amount available for the period
    pub total_amount: Money,

    /// Cached sum of expense transactions linked to this budget.
    /// The transaction log is the source of truth; this field is
    /// recomputed from it after every mutation.
    pub spent_amount: Money,

    /// Even per-day allowance
    pub daily_budget: Money,

    /// First day of the period (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the period (inclusive)
    pub end_date: NaiveDate,

    /// Budget status
    #[serde(default)]
    pub status: BudgetStatus,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Day the daily budget was last recalculated
    pub last_daily_budget_update: Option<NaiveDate>,

    /// When the budget was created
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new active budget for a date range
    ///
    /// The daily budget is the total split evenly across the period,
    /// rounded half-up to the cent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `end_date` is before `start_date`.
    pub fn new(
        total_amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        description: impl Into<String>,
    ) -> MoneyTrackResult<Self> {
        if end_date < start_date {
            return Err(MoneyTrackError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        let mut budget = Self {
            id: BudgetId::new(),
            total_amount,
            spent_amount: Money::zero(),
            daily_budget: Money::zero(),
            start_date,
            end_date,
            status: BudgetStatus::Active,
            description: description.into(),
            last_daily_budget_update: None,
            created_at: Utc::now(),
        };
        budget.daily_budget = total_amount.divide_round_half_up(budget.total_days())?;
        Ok(budget)
    }

    /// Total days in the period, inclusive of both endpoints (always >= 1)
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Days left in the period as of `today`, counting today itself
    ///
    /// Returns 0 once the period has ended.
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        if today > self.end_date {
            return 0;
        }
        (self.end_date - today).num_days() + 1
    }

    /// Amount left to spend; negative when over budget
    pub fn remaining_amount(&self) -> Money {
        self.total_amount - self.spent_amount
    }

    /// Percentage of the total spent so far
    ///
    /// Returns 0.0 when the total is zero.
    pub fn spent_percentage(&self) -> f64 {
        self.spent_amount.percentage_of(self.total_amount)
    }

    /// Redistribute the remaining amount evenly across the remaining days
    ///
    /// No-op once the period has ended. Stamps `last_daily_budget_update`
    /// with `today` so repeated same-day calls are idempotent.
    pub fn recalculate_daily_budget(&mut self, today: NaiveDate) -> MoneyTrackResult<()> {
        let remaining_days = self.remaining_days(today);
        if remaining_days == 0 {
            return Ok(());
        }
        self.daily_budget = self.remaining_amount().divide_round_half_up(remaining_days)?;
        self.last_daily_budget_update = Some(today);
        Ok(())
    }

    /// Whether the budget is active and `today` falls within its period
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.status == BudgetStatus::Active
            && today >= self.start_date
            && today <= self.end_date
    }

    /// Whether spending has exceeded the total
    pub fn is_over_budget(&self) -> bool {
        self.spent_amount > self.total_amount
    }
}
