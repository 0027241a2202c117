//! Menu Category Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key of the "no filtering" sentinel used by category pickers
pub const ALL_CATEGORIES_KEY: &str = "all";

/// Menu category (closed set)
///
/// Serialized as the lower-case key, e.g. `"mains"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    Appetizers,
    Mains,
    Desserts,
    Beverages,
}

impl MenuCategory {
    /// All categories in menu display order
    pub const ALL: [MenuCategory; 4] = [
        MenuCategory::Appetizers,
        MenuCategory::Mains,
        MenuCategory::Desserts,
        MenuCategory::Beverages,
    ];

    /// Storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizers => "appetizers",
            MenuCategory::Mains => "mains",
            MenuCategory::Desserts => "desserts",
            MenuCategory::Beverages => "beverages",
        }
    }

    /// Human readable label shown on category buttons
    pub fn label(&self) -> &'static str {
        match self {
            MenuCategory::Appetizers => "Appetizers",
            MenuCategory::Mains => "Main Courses",
            MenuCategory::Desserts => "Desserts",
            MenuCategory::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown menu category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for MenuCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        MenuCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Category selection of a menu list: everything, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MenuCategory),
}

impl CategoryFilter {
    /// Picker options: `All` first, then every category in display order
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(MenuCategory::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, category: MenuCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES_KEY,
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl From<MenuCategory> for CategoryFilter {
    fn from(category: MenuCategory) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    /// `""` and `"all"` select everything
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.is_empty() || key.eq_ignore_ascii_case(ALL_CATEGORIES_KEY) {
            return Ok(CategoryFilter::All);
        }
        key.parse().map(CategoryFilter::Only)
    }
}
