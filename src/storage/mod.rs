//! Storage layer for MoneyTrack
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Monetary values are stored as integer cents so no precision is
//! lost in serialization.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::config::paths::MoneyTrackPaths;
use crate::error::MoneyTrackError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MoneyTrackPaths,
    pub budgets: BudgetRepository,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MoneyTrackPaths) -> Result<Self, MoneyTrackError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &MoneyTrackPaths {
        &self.paths
    }

    /// Load all data from disk, seeding default categories on first use
    pub fn load_all(&mut self) -> Result<(), MoneyTrackError> {
        self.budgets.load()?;
        self.transactions.load()?;
        self.categories.load()?;
        if self.categories.seed_defaults()? > 0 {
            self.categories.save()?;
        }
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), MoneyTrackError> {
        self.budgets.save()?;
        self.transactions.save()?;
        self.categories.save()?;
        Ok(())
    }

    /// Discard in-memory state and re-read everything from disk
    ///
    /// Used by the accounting service to roll back a half-applied operation
    /// after a failed save, so readers never observe partial mutation.
    pub fn reload_all(&self) -> Result<(), MoneyTrackError> {
        self.budgets.load()?;
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CATEGORIES;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_load_all_seeds_default_categories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert_eq!(storage.categories.count().unwrap(), DEFAULT_CATEGORIES.len());

        // The seed is persisted, so a fresh load finds it on disk
        let paths2 = MoneyTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage2 = Storage::new(paths2).unwrap();
        storage2.load_all().unwrap();
        assert_eq!(storage2.categories.count().unwrap(), DEFAULT_CATEGORIES.len());
    }
}
