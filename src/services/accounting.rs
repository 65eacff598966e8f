//! Budget accounting service
//!
//! Orchestrates budget lifecycle and transaction recording: creating a
//! budget completes any prior active one, and every mutating transaction
//! call triggers a full recompute of the owning budget's spent amount from
//! the transaction log. The recompute-from-log strategy is deliberate: the
//! cached figure can never drift from the source of truth.

use chrono::NaiveDate;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{Budget, BudgetId, CategoryId, Money, Transaction, TransactionId};
use crate::storage::Storage;

/// Service for budget accounting
pub struct AccountingService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountingService<'a> {
    /// Create a new accounting service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget, completing any existing active budget first
    ///
    /// Emits one `SetBudget` audit transaction carrying the total amount.
    /// The whole operation is applied and saved as a unit: a reader never
    /// observes zero or two active budgets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `end_date` is before `start_date`.
    pub fn create_budget(
        &self,
        total_amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        description: impl Into<String>,
    ) -> MoneyTrackResult<Budget> {
        let budget = Budget::new(total_amount, start_date, end_date, description)?;

        self.storage.budgets.complete_active()?;
        self.storage.budgets.insert(budget.clone())?;

        let audit_description = if budget.description.is_empty() {
            "Budget set: New budget".to_string()
        } else {
            format!("Budget set: {}", budget.description)
        };
        self.storage.transactions.insert(Transaction::budget_set(
            budget.total_amount,
            budget.id,
            audit_description,
        ))?;

        self.persist()?;
        Ok(budget)
    }

    /// Get the current active budget, if any
    pub fn current_budget(&self) -> MoneyTrackResult<Option<Budget>> {
        self.storage.budgets.get_active()
    }

    /// Get a budget by ID
    pub fn get_budget(&self, id: BudgetId) -> MoneyTrackResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .ok_or_else(|| MoneyTrackError::budget_not_found(id.to_string()))
    }

    /// List all budgets, newest first
    pub fn list_budgets(&self) -> MoneyTrackResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Mark the current active budget as completed
    pub fn complete_current_budget(&self) -> MoneyTrackResult<()> {
        self.storage.budgets.complete_active()?;
        self.persist()
    }

    /// Record an expense transaction
    ///
    /// When linked to a budget, the budget's spent amount is recomputed
    /// from the transaction log.
    pub fn record_expense(
        &self,
        amount: Money,
        description: impl Into<String>,
        category_id: Option<CategoryId>,
        notes: impl Into<String>,
        budget_id: Option<BudgetId>,
    ) -> MoneyTrackResult<Transaction> {
        if !amount.is_positive() {
            return Err(MoneyTrackError::Validation(
                "Expense amount must be positive".into(),
            ));
        }
        if let Some(category_id) = category_id {
            if self.storage.categories.get(category_id)?.is_none() {
                return Err(MoneyTrackError::category_not_found(category_id.to_string()));
            }
        }
        if let Some(budget_id) = budget_id {
            if self.storage.budgets.get(budget_id)?.is_none() {
                return Err(MoneyTrackError::budget_not_found(budget_id.to_string()));
            }
        }

        let mut txn = Transaction::expense(amount, description, category_id, budget_id);
        txn.notes = notes.into();
        self.storage.transactions.insert(txn.clone())?;

        if let Some(budget_id) = budget_id {
            self.recompute_spent(budget_id)?;
        }

        self.persist()?;
        Ok(txn)
    }

    /// Record an income transaction
    ///
    /// Income is tracked for record-keeping only; it is not netted against
    /// any budget's spent or remaining amount.
    pub fn record_income(
        &self,
        amount: Money,
        description: impl Into<String>,
        notes: impl Into<String>,
    ) -> MoneyTrackResult<Transaction> {
        if !amount.is_positive() {
            return Err(MoneyTrackError::Validation(
                "Income amount must be positive".into(),
            ));
        }

        let mut txn = Transaction::income(amount, description);
        txn.notes = notes.into();
        self.storage.transactions.insert(txn.clone())?;

        self.persist()?;
        Ok(txn)
    }

    /// Update a transaction in place
    ///
    /// The owning budget's spent amount is recomputed afterwards.
    pub fn update_transaction(
        &self,
        id: TransactionId,
        amount: Money,
        description: impl Into<String>,
        category_id: Option<CategoryId>,
        notes: impl Into<String>,
    ) -> MoneyTrackResult<Transaction> {
        if !amount.is_positive() {
            return Err(MoneyTrackError::Validation(
                "Transaction amount must be positive".into(),
            ));
        }
        if let Some(category_id) = category_id {
            if self.storage.categories.get(category_id)?.is_none() {
                return Err(MoneyTrackError::category_not_found(category_id.to_string()));
            }
        }

        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| MoneyTrackError::transaction_not_found(id.to_string()))?;

        txn.amount = amount;
        txn.description = description.into();
        txn.category_id = category_id;
        txn.notes = notes.into();
        self.storage.transactions.update(txn.clone())?;

        if let Some(budget_id) = txn.budget_id {
            self.recompute_spent(budget_id)?;
        }

        self.persist()?;
        Ok(txn)
    }

    /// Delete a transaction
    ///
    /// The owning budget's spent amount is recomputed afterwards.
    pub fn delete_transaction(&self, id: TransactionId) -> MoneyTrackResult<()> {
        let deleted = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| MoneyTrackError::transaction_not_found(id.to_string()))?;

        if let Some(budget_id) = deleted.budget_id {
            self.recompute_spent(budget_id)?;
        }

        self.persist()
    }

    /// Recompute a budget's cached spent amount from the transaction log
    ///
    /// `spent = SUM(amount) over expense transactions with this budget id`.
    /// Full recompute rather than an incremental adjustment, so the cache is
    /// self-correcting after any sequence of edits.
    pub fn recompute_spent(&self, budget_id: BudgetId) -> MoneyTrackResult<Money> {
        let spent = self.storage.transactions.sum_expenses_by_budget(budget_id)?;
        self.storage.budgets.update_spent_amount(budget_id, spent)?;
        Ok(spent)
    }

    /// Redistribute a budget's remaining amount across its remaining days
    ///
    /// No-op when the period has ended.
    pub fn recalculate_daily_budget(
        &self,
        budget_id: BudgetId,
        today: NaiveDate,
    ) -> MoneyTrackResult<Budget> {
        let mut budget = self.get_budget(budget_id)?;
        budget.recalculate_daily_budget(today)?;
        self.storage.budgets.update(budget.clone())?;
        self.persist()?;
        Ok(budget)
    }

    /// Save all repositories, rolling back in-memory state on failure
    fn persist(&self) -> MoneyTrackResult<()> {
        if let Err(err) = self.storage.save_all() {
            // Re-read disk state so the failed operation leaves no trace
            let _ = self.storage.reload_all();
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MoneyTrackPaths;
    use crate::models::BudgetStatus;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_january_budget(service: &AccountingService) -> Budget {
        service
            .create_budget(
                Money::from_cents(100_000),
                date(2024, 1, 1),
                date(2024, 1, 10),
                "Test",
            )
            .unwrap()
    }

    #[test]
    fn test_create_budget_initial_figures() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        assert_eq!(budget.total_days(), 10);
        assert_eq!(budget.daily_budget.cents(), 10_000);
        assert_eq!(budget.spent_amount, Money::zero());
    }

    #[test]
    fn test_create_budget_rejects_inverted_range() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let result = service.create_budget(
            Money::from_cents(100_000),
            date(2024, 1, 10),
            date(2024, 1, 1),
            "Backwards",
        );
        assert!(matches!(result, Err(MoneyTrackError::InvalidRange { .. })));
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_create_budget_emits_audit_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);

        let txns = storage.transactions.get_by_budget(budget.id).unwrap();
        assert_eq!(txns.len(), 1);
        assert!(txns[0].is_budget_event());
        assert_eq!(txns[0].amount, budget.total_amount);
        assert_eq!(txns[0].description, "Budget set: Test");
    }

    #[test]
    fn test_at_most_one_active_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let first = create_january_budget(&service);
        let second = service
            .create_budget(
                Money::from_cents(50_000),
                date(2024, 2, 1),
                date(2024, 2, 29),
                "February",
            )
            .unwrap();
        let third = service
            .create_budget(
                Money::from_cents(80_000),
                date(2024, 3, 1),
                date(2024, 3, 31),
                "March",
            )
            .unwrap();

        let budgets = service.list_budgets().unwrap();
        assert_eq!(budgets.len(), 3);
        let active: Vec<_> = budgets
            .iter()
            .filter(|b| b.status == BudgetStatus::Active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, third.id);

        assert_eq!(
            service.get_budget(first.id).unwrap().status,
            BudgetStatus::Completed
        );
        assert_eq!(
            service.get_budget(second.id).unwrap().status,
            BudgetStatus::Completed
        );
    }

    #[test]
    fn test_current_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        assert!(service.current_budget().unwrap().is_none());
        let budget = create_january_budget(&service);
        assert_eq!(service.current_budget().unwrap().unwrap().id, budget.id);

        service.complete_current_budget().unwrap();
        assert!(service.current_budget().unwrap().is_none());
    }

    #[test]
    fn test_record_expense_updates_spent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        service
            .record_expense(
                Money::from_cents(30_000),
                "Groceries",
                None,
                "",
                Some(budget.id),
            )
            .unwrap();

        let budget = service.get_budget(budget.id).unwrap();
        assert_eq!(budget.spent_amount.cents(), 30_000);
        assert_eq!(budget.remaining_amount().cents(), 70_000);
        assert_eq!(budget.spent_percentage(), 30.0);
    }

    #[test]
    fn test_record_expense_unknown_budget_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let result = service.record_expense(
            Money::from_cents(500),
            "Lunch",
            None,
            "",
            Some(BudgetId::new()),
        );
        assert!(matches!(result, Err(MoneyTrackError::NotFound { .. })));
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_record_expense_unknown_category_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let result = service.record_expense(
            Money::from_cents(500),
            "Lunch",
            Some(CategoryId::new()),
            "",
            None,
        );
        assert!(matches!(result, Err(MoneyTrackError::NotFound { .. })));
    }

    #[test]
    fn test_record_expense_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        assert!(service
            .record_expense(Money::zero(), "Nothing", None, "", None)
            .is_err());
        assert!(service
            .record_expense(Money::from_cents(-100), "Negative", None, "", None)
            .is_err());
    }

    #[test]
    fn test_record_income_does_not_touch_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        service
            .record_income(Money::from_cents(50_000), "Salary", "")
            .unwrap();

        let budget = service.get_budget(budget.id).unwrap();
        assert_eq!(budget.spent_amount, Money::zero());
        assert_eq!(budget.remaining_amount(), budget.total_amount);
    }

    #[test]
    fn test_update_transaction_recomputes_spent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        let txn = service
            .record_expense(
                Money::from_cents(30_000),
                "Groceries",
                None,
                "",
                Some(budget.id),
            )
            .unwrap();

        service
            .update_transaction(txn.id, Money::from_cents(45_000), "Groceries", None, "")
            .unwrap();

        let budget = service.get_budget(budget.id).unwrap();
        assert_eq!(budget.spent_amount.cents(), 45_000);
    }

    #[test]
    fn test_delete_transaction_recomputes_spent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        let txn = service
            .record_expense(
                Money::from_cents(30_000),
                "Groceries",
                None,
                "",
                Some(budget.id),
            )
            .unwrap();

        service.delete_transaction(txn.id).unwrap();

        let budget = service.get_budget(budget.id).unwrap();
        assert_eq!(budget.spent_amount, Money::zero());
    }

    #[test]
    fn test_delete_missing_transaction_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let result = service.delete_transaction(TransactionId::new());
        assert!(matches!(result, Err(MoneyTrackError::NotFound { .. })));
    }

    #[test]
    fn test_spent_consistent_after_mixed_mutations() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        let a = service
            .record_expense(Money::from_cents(1_000), "a", None, "", Some(budget.id))
            .unwrap();
        let b = service
            .record_expense(Money::from_cents(2_000), "b", None, "", Some(budget.id))
            .unwrap();
        service
            .record_expense(Money::from_cents(4_000), "c", None, "", Some(budget.id))
            .unwrap();
        service
            .update_transaction(b.id, Money::from_cents(2_500), "b", None, "")
            .unwrap();
        service.delete_transaction(a.id).unwrap();

        let budget = service.get_budget(budget.id).unwrap();
        let from_log = storage.transactions.sum_expenses_by_budget(budget.id).unwrap();
        assert_eq!(budget.spent_amount, from_log);
        assert_eq!(budget.spent_amount.cents(), 6_500);
        assert_eq!(
            budget.total_amount,
            budget.spent_amount + budget.remaining_amount()
        );
    }

    #[test]
    fn test_recalculate_daily_budget_redistributes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        service
            .record_expense(
                Money::from_cents(30_000),
                "Groceries",
                None,
                "",
                Some(budget.id),
            )
            .unwrap();

        // Day 6 of 10: 700.00 over 5 remaining days
        let budget = service
            .recalculate_daily_budget(budget.id, date(2024, 1, 6))
            .unwrap();
        assert_eq!(budget.daily_budget.cents(), 14_000);
        assert_eq!(budget.last_daily_budget_update, Some(date(2024, 1, 6)));
    }

    #[test]
    fn test_state_survives_reload() {
        let (temp_dir, storage) = create_test_storage();
        let service = AccountingService::new(&storage);

        let budget = create_january_budget(&service);
        service
            .record_expense(
                Money::from_cents(30_000),
                "Groceries",
                None,
                "",
                Some(budget.id),
            )
            .unwrap();

        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage2 = Storage::new(paths).unwrap();
        storage2.load_all().unwrap();
        let service2 = AccountingService::new(&storage2);

        let reloaded = service2.get_budget(budget.id).unwrap();
        assert_eq!(reloaded.spent_amount.cents(), 30_000);
        assert_eq!(service2.current_budget().unwrap().unwrap().id, budget.id);
    }
}
