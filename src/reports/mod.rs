//! Spending reports and budget analytics

pub mod spending;

pub use spending::{daily_spending, spending_by_category, BudgetSummary};
