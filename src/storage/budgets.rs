//! Budget repository for JSON storage
//!
//! Persists budgets and answers the active-budget query. The single-active
//! invariant itself is enforced by the accounting service inside
//! `create_budget`; this repository only provides the primitives.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyTrackError;
use crate::models::{Budget, BudgetId, BudgetStatus, Money};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget file contents
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), MoneyTrackError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), MoneyTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budget_list: Vec<_> = budgets.values().cloned().collect();
        budget_list.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let file_data = BudgetData {
            budgets: budget_list,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, MoneyTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get the current active budget (newest first if several exist)
    pub fn get_active(&self) -> Result<Option<Budget>, MoneyTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .values()
            .filter(|b| b.status == BudgetStatus::Active)
            .max_by_key(|b| b.created_at)
            .cloned())
    }

    /// Get all budgets ordered by creation date (newest first)
    pub fn get_all(&self) -> Result<Vec<Budget>, MoneyTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Insert a budget
    pub fn insert(&self, budget: Budget) -> Result<(), MoneyTrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Update an existing budget
    pub fn update(&self, budget: Budget) -> Result<(), MoneyTrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if !budgets.contains_key(&budget.id) {
            return Err(MoneyTrackError::budget_not_found(budget.id.to_string()));
        }
        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Update the cached spent amount of a budget
    pub fn update_spent_amount(
        &self,
        id: BudgetId,
        spent: Money,
    ) -> Result<(), MoneyTrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let budget = budgets
            .get_mut(&id)
            .ok_or_else(|| MoneyTrackError::budget_not_found(id.to_string()))?;
        budget.spent_amount = spent;
        Ok(())
    }

    /// Mark every active budget as completed, returning how many changed
    pub fn complete_active(&self) -> Result<usize, MoneyTrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut changed = 0;
        for budget in budgets.values_mut() {
            if budget.status == BudgetStatus::Active {
                budget.status = BudgetStatus::Completed;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, MoneyTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }
}
