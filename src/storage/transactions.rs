//! Transaction repository for JSON storage
//!
//! Persists the transaction log and answers the expense aggregation queries
//! the accounting service and reports rely on. Only expense transactions
//! participate in the sums; income and budget events are stored but never
//! aggregated as spending.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::MoneyTrackError;
use crate::models::{BudgetId, CategoryId, Money, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction file contents
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transactions: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), MoneyTrackError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        transactions.clear();
        for txn in file_data.transactions {
            transactions.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut txn_list: Vec<_> = transactions.values().cloned().collect();
        txn_list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let file_data = TransactionData {
            transactions: txn_list,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(transactions.get(&id).cloned())
    }

    /// Insert a transaction
    pub fn insert(&self, txn: Transaction) -> Result<(), MoneyTrackError> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        transactions.insert(txn.id, txn);
        Ok(())
    }

    /// Update an existing transaction
    pub fn update(&self, txn: Transaction) -> Result<(), MoneyTrackError> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if !transactions.contains_key(&txn.id) {
            return Err(MoneyTrackError::transaction_not_found(txn.id.to_string()));
        }
        transactions.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, MoneyTrackError> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(transactions.remove(&id))
    }

    /// Get all transactions linked to a budget, newest first
    pub fn get_by_budget(&self, budget_id: BudgetId) -> Result<Vec<Transaction>, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| t.budget_id == Some(budget_id))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(list)
    }

    /// Get the most recent transactions across all budgets
    pub fn get_recent(&self, limit: usize) -> Result<Vec<Transaction>, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = transactions.values().cloned().collect();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list.truncate(limit);
        Ok(list)
    }

    /// Sum of expense amounts linked to a budget
    ///
    /// This is the source-of-truth aggregate the cached `spent_amount` on a
    /// budget is recomputed from.
    pub fn sum_expenses_by_budget(&self, budget_id: BudgetId) -> Result<Money, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(transactions
            .values()
            .filter(|t| t.is_expense() && t.budget_id == Some(budget_id))
            .map(|t| t.amount)
            .sum())
    }

    /// Sum of expense amounts per category for a budget
    ///
    /// Uncategorized expenses are keyed by `None`.
    pub fn sum_expenses_by_category(
        &self,
        budget_id: BudgetId,
    ) -> Result<HashMap<Option<CategoryId>, Money>, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut sums: HashMap<Option<CategoryId>, Money> = HashMap::new();
        for txn in transactions
            .values()
            .filter(|t| t.is_expense() && t.budget_id == Some(budget_id))
        {
            *sums.entry(txn.category_id).or_insert(Money::zero()) += txn.amount;
        }
        Ok(sums)
    }

    /// Expense totals per calendar day within a date range (inclusive)
    ///
    /// Days are local calendar days, matching the dates users type at the
    /// CLI, so a late-evening expense lands on the day it was made rather
    /// than the next UTC day.
    pub fn sum_expenses_by_day(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<std::collections::BTreeMap<NaiveDate, Money>, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut sums = std::collections::BTreeMap::new();
        for txn in transactions.values().filter(|t| t.is_expense()) {
            let day = txn.timestamp.with_timezone(&chrono::Local).date_naive();
            if day >= start_date && day <= end_date {
                *sums.entry(day).or_insert(Money::zero()) += txn.amount;
            }
        }
        Ok(sums)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, MoneyTrackError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(transactions.len())
    }
}
