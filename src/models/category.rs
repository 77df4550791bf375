//! Category registry entries
//!
//! Categories are plain labels. Transactions store the name, not a
//! reference, so registering a category never re-tags history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category given to transactions that move money into or out of an asset
pub const ASSET_TRANSFER_CATEGORY: &str = "Asset Transfer";

/// Category given to transactions that move money into or out of a goal
pub const GOAL_SAVINGS_CATEGORY: &str = "Goal Savings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    pub icon: String,

    #[serde(default, rename = "custom")]
    pub is_custom: bool,
}

impl Category {
    pub fn builtin(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            is_custom: false,
        }
    }

    pub fn custom(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            is_custom: true,
        }
    }

    /// Case-insensitive name comparison
    pub fn matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// The registry a fresh install starts with
pub fn default_categories() -> Vec<Category> {
    [
        ("Food", "🍔"),
        ("Transport", "🚗"),
        ("Shopping", "🛍️"),
        ("Bills", "🧾"),
        ("Entertainment", "🎬"),
        ("Health", "💊"),
    ]
    .into_iter()
    .map(|(name, icon)| Category::builtin(name, icon))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long ({0} chars, max 50)")]
    NameTooLong(usize),
}
