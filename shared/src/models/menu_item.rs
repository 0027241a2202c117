//! Menu Item Model
//!
//! JSON layout is the flat catalog format already persisted on devices:
//!
//! ```json
//! {
//!   "id": "1718000000000",
//!   "name": "Burger",
//!   "description": "Beef patty",
//!   "price": 89.5,
//!   "category": "mains",
//!   "createdAt": "2024-06-10T08:00:00.000Z"
//! }
//! ```

use super::category::MenuCategory;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Opaque unique identifier, immutable after creation
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Currency amount, stored as a JSON number
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    pub category: MenuCategory,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    /// Mutable part of the item
    pub fn fields(&self) -> MenuItemFields {
        MenuItemFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
        }
    }

    /// Replace name, description, price and category; id and created_at are kept
    pub fn apply(&mut self, fields: MenuItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
    }

    /// Price with a missing value counted as zero
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

/// Editable fields of a menu item
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemFields {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: MenuCategory,
}

/// Upsert payload
///
/// `id` and `created_at` are optional: an id that matches a stored item
/// updates it, anything else is appended as a new item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub fields: MenuItemFields,
}

impl MenuItemDraft {
    /// Draft for a brand new item
    pub fn new(fields: MenuItemFields) -> Self {
        Self {
            id: None,
            created_at: None,
            fields,
        }
    }

    /// Draft targeting an existing id
    pub fn with_id(id: impl Into<String>, fields: MenuItemFields) -> Self {
        Self {
            id: Some(id.into()),
            created_at: None,
            fields,
        }
    }
}

impl From<MenuItem> for MenuItemDraft {
    fn from(item: MenuItem) -> Self {
        let fields = item.fields();
        Self {
            id: Some(item.id),
            created_at: Some(item.created_at),
            fields,
        }
    }
}
