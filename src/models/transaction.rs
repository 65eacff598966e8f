//! Transaction model
//!
//! Represents expenses, income, and budget-level audit entries. Only expense
//! transactions count toward a budget's spent amount; the `SetBudget` and
//! `SetDailyBudget` kinds record budget events without being aggregated as
//! spending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, TransactionId};
use super::money::Money;

/// Kind of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money spent against a budget
    Expense,
    /// Money received (not netted against any budget)
    Income,
    /// Audit entry recording that a budget was set
    SetBudget,
    /// Audit entry recording a daily budget adjustment
    SetDailyBudget,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
            Self::SetBudget => write!(f, "Set Budget"),
            Self::SetDailyBudget => write!(f, "Set Daily Budget"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Kind of transaction
    pub kind: TransactionKind,

    /// Amount (positive by convention; the sign is implied by the kind)
    pub amount: Money,

    /// Description
    pub description: String,

    /// Category (expenses only; None means uncategorized)
    pub category_id: Option<CategoryId>,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the transaction occurred
    pub timestamp: DateTime<Utc>,

    /// The budget this transaction is linked to, if any
    pub budget_id: Option<BudgetId>,
}

impl Transaction {
    /// Create a new transaction of the given kind
    pub fn new(kind: TransactionKind, amount: Money, description: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            description: description.into(),
            category_id: None,
            notes: String::new(),
            timestamp: Utc::now(),
            budget_id: None,
        }
    }

    /// Create an expense linked to a budget and category
    pub fn expense(
        amount: Money,
        description: impl Into<String>,
        category_id: Option<CategoryId>,
        budget_id: Option<BudgetId>,
    ) -> Self {
        let mut txn = Self::new(TransactionKind::Expense, amount, description);
        txn.category_id = category_id;
        txn.budget_id = budget_id;
        txn
    }

    /// Create an income transaction
    pub fn income(amount: Money, description: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, description)
    }

    /// Create the audit entry emitted when a budget is set
    pub fn budget_set(amount: Money, budget_id: BudgetId, description: impl Into<String>) -> Self {
        let mut txn = Self::new(TransactionKind::SetBudget, amount, description);
        txn.budget_id = Some(budget_id);
        txn
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if this is a budget-level audit entry
    pub fn is_budget_event(&self) -> bool {
        matches!(
            self.kind,
            TransactionKind::SetBudget | TransactionKind::SetDailyBudget
        )
    }
}
