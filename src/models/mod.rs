//! Core data models for MoneyTrack
//!
//! This module contains the data structures that represent the budgeting
//! domain: budgets, transactions, categories, and the money type.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{Budget, BudgetStatus};
pub use category::{Category, DEFAULT_CATEGORIES};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind};
