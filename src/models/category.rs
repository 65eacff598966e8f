//! Category model
//!
//! Categories organize expenses by type. A fixed set of default categories
//! is seeded on first use; defaults cannot be renamed or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Names of the default categories seeded on first use
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Personal Care",
    "Other",
];

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (unique)
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Hex color code for presentation
    pub color: Option<String>,

    /// Whether this is a seeded default category
    #[serde(default)]
    pub is_default: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new user-defined category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: String::new(),
            color: None,
            is_default: false,
            created_at: Utc::now(),
        }
    }

    /// Create a category with description and color
    pub fn with_details(
        name: impl Into<String>,
        description: impl Into<String>,
        color: Option<String>,
    ) -> Self {
        let mut category = Self::new(name);
        category.description = description.into();
        category.color = color;
        category
    }

    /// Create a seeded default category
    pub fn default_category(name: impl Into<String>) -> Self {
        let mut category = Self::new(name);
        category.is_default = true;
        category
    }

    /// Whether this category may be deleted
    pub fn can_delete(&self) -> bool {
        !self.is_default
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
