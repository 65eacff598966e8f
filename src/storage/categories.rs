//! Category repository for JSON storage
//!
//! Read-mostly reference data. Default categories are seeded once on first
//! use and cannot be updated or deleted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneyTrackError;
use crate::models::{Category, CategoryId, DEFAULT_CATEGORIES};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category file contents
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    #[serde(default)]
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), MoneyTrackError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), MoneyTrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.name.cmp(&b.name))
        });

        let file_data = CategoryData { categories: list };
        write_json_atomic(&self.path, &file_data)
    }

    /// Seed the default categories if they are missing
    ///
    /// Idempotent: names already present are left untouched.
    pub fn seed_defaults(&self) -> Result<usize, MoneyTrackError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut seeded = 0;
        for name in DEFAULT_CATEGORIES {
            let exists = categories.values().any(|c| c.name == name);
            if !exists {
                let category = Category::default_category(name);
                categories.insert(category.id, category);
                seeded += 1;
            }
        }
        Ok(seeded)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, MoneyTrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    /// Get a category by name (exact match)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, MoneyTrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    /// Get all categories, defaults first then by name
    pub fn get_all(&self) -> Result<Vec<Category>, MoneyTrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(list)
    }

    /// Build an id -> name lookup map
    pub fn name_lookup(&self) -> Result<HashMap<CategoryId, String>, MoneyTrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories
            .values()
            .map(|c| (c.id, c.name.clone()))
            .collect())
    }

    /// Insert a new category
    ///
    /// Fails with `Duplicate` if a category with the same name exists.
    pub fn insert(&self, category: Category) -> Result<(), MoneyTrackError> {
        category
            .validate()
            .map_err(|e| MoneyTrackError::Validation(e.to_string()))?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if categories.values().any(|c| c.name == category.name) {
            return Err(MoneyTrackError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }
        categories.insert(category.id, category);
        Ok(())
    }

    /// Update a non-default category
    pub fn update(&self, category: Category) -> Result<(), MoneyTrackError> {
        category
            .validate()
            .map_err(|e| MoneyTrackError::Validation(e.to_string()))?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let existing = categories
            .get(&category.id)
            .ok_or_else(|| MoneyTrackError::category_not_found(category.id.to_string()))?;
        if existing.is_default {
            return Err(MoneyTrackError::Validation(
                "Default categories cannot be modified".into(),
            ));
        }
        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a non-default category
    pub fn delete(&self, id: CategoryId) -> Result<(), MoneyTrackError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let existing = categories
            .get(&id)
            .ok_or_else(|| MoneyTrackError::category_not_found(id.to_string()))?;
        if !existing.can_delete() {
            return Err(MoneyTrackError::Validation(
                "Default categories cannot be deleted".into(),
            ));
        }
        categories.remove(&id);
        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, MoneyTrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| MoneyTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.len())
    }
}
