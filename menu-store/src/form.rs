//! Add/edit form validation
//!
//! The form works on raw text exactly as typed. Nothing reaches the
//! catalog until [`MenuItemForm::validate`] succeeds, so a rejected form
//! never causes a partial save.

use crate::price::{is_valid_price, parse_price};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{MenuCategory, MenuItem, MenuItemFields};
use thiserror::Error;

/// Menu item names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({0} is empty)")]
    MissingRequired(&'static str),

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Please enter a valid price (digits with up to two decimals), got {0:?}")]
    InvalidPriceFormat(String),

    #[error("Please enter a valid price (must be greater than zero)")]
    NonPositivePrice,
}

/// Raw add/edit form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: MenuCategory,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: MenuCategory::Appetizers,
        }
    }
}

impl MenuItemForm {
    /// Pre-fill the form from an item being edited
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.map(prefill_price).unwrap_or_default(),
            category: item.category,
        }
    }

    pub fn validate(&self) -> Result<MenuItemFields, ValidationError> {
        let name = self.name.trim();
        let price = self.price.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingRequired("name"));
        }
        if price.is_empty() {
            return Err(ValidationError::MissingRequired("price"));
        }
        check_len("name", name, MAX_NAME_LEN)?;

        let description = self.description.trim();
        check_len("description", description, MAX_DESCRIPTION_LEN)?;

        if !is_valid_price(price) {
            return Err(ValidationError::InvalidPriceFormat(price.to_string()));
        }
        let amount = parse_price(price);
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice);
        }

        Ok(MenuItemFields {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            price: Some(amount),
            category: self.category,
        })
    }
}

/// Stored amounts may carry more decimals than the form accepts
fn prefill_price(price: Decimal) -> String {
    price
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn form(name: &str, description: &str, price: &str) -> MenuItemForm {
        MenuItemForm {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            category: MenuCategory::Mains,
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let fields = form("  Burger ", "  Beef patty ", " 89.50 ").validate().unwrap();
        assert_eq!(fields.name, "Burger");
        assert_eq!(fields.description.as_deref(), Some("Beef patty"));
        assert_eq!(fields.price, Some(Decimal::from_str("89.5").unwrap()));
        assert_eq!(fields.category, MenuCategory::Mains);
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let fields = form("Tea", "   ", "12").validate().unwrap();
        assert_eq!(fields.description, None);
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            form("  ", "", "10").validate(),
            Err(ValidationError::MissingRequired("name"))
        );
        assert_eq!(
            form("Tea", "", " ").validate(),
            Err(ValidationError::MissingRequired("price"))
        );
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(
            form("Tea", "", "abc").validate(),
            Err(ValidationError::InvalidPriceFormat("abc".to_string()))
        );
        assert_eq!(
            form("Tea", "", "-3").validate(),
            Err(ValidationError::InvalidPriceFormat("-3".to_string()))
        );
        assert_eq!(
            form("Tea", "", "12.555").validate(),
            Err(ValidationError::InvalidPriceFormat("12.555".to_string()))
        );
        assert_eq!(form("Tea", "", "0").validate(), Err(ValidationError::NonPositivePrice));
        assert_eq!(form("Tea", "", "0.00").validate(), Err(ValidationError::NonPositivePrice));
    }

    #[test]
    fn test_length_limits() {
        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            form(&long_name, "", "10").validate(),
            Err(ValidationError::TooLong { field: "name", .. })
        ));

        let long_description = "y".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            form("Tea", &long_description, "10").validate(),
            Err(ValidationError::TooLong { field: "description", .. })
        ));
    }

    #[test]
    fn test_from_item_round_trips_through_validate() {
        let item = MenuItem {
            id: "7".to_string(),
            name: "Malva Pudding".to_string(),
            description: None,
            price: Some(Decimal::from_str("45.50").unwrap()),
            category: MenuCategory::Desserts,
            created_at: chrono::Utc::now(),
        };
        let form = MenuItemForm::from_item(&item);
        assert_eq!(form.price, "45.5");
        assert_eq!(form.description, "");
        assert_eq!(form.validate().unwrap(), item.fields());
    }

    #[test]
    fn test_from_item_rounds_legacy_price_to_cents() {
        let item = MenuItem {
            id: "8".to_string(),
            name: "Espresso".to_string(),
            description: None,
            price: Some(Decimal::from_str("2.345").unwrap()),
            category: MenuCategory::Beverages,
            created_at: chrono::Utc::now(),
        };
        let form = MenuItemForm::from_item(&item);
        assert_eq!(form.price, "2.35");

        let fields = form.validate().unwrap();
        assert_eq!(fields.price, Some(Decimal::from_str("2.35").unwrap()));
    }
}
