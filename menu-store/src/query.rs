//! Menu query utilities
//!
//! Pure functions over an already loaded catalog. Input order is preserved
//! by every operation except [`sort_by_price`].

use rust_decimal::Decimal;
use shared::models::{CategoryFilter, MenuCategory, MenuItem};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Price sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Case-insensitive substring search over name, description and category.
///
/// A blank query returns the input unchanged.
pub fn search(items: &[MenuItem], query: &str) -> Vec<MenuItem> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&term)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
                || item.category.as_str().contains(&term)
        })
        .cloned()
        .collect()
}

pub fn filter_by_category(items: &[MenuItem], filter: CategoryFilter) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| filter.matches(item.category))
        .cloned()
        .collect()
}

/// String-keyed variant: `""` / `"all"` keep everything, an unknown key matches nothing
pub fn filter_by_category_key(items: &[MenuItem], key: &str) -> Vec<MenuItem> {
    match CategoryFilter::from_str(key) {
        Ok(filter) => filter_by_category(items, filter),
        Err(_) => Vec::new(),
    }
}

/// Partition by category, keeping insertion order inside each group
pub fn group_by_category(items: &[MenuItem]) -> BTreeMap<MenuCategory, Vec<MenuItem>> {
    let mut groups: BTreeMap<MenuCategory, Vec<MenuItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category).or_default().push(item.clone());
    }
    groups
}

pub fn unique_categories(items: &[MenuItem]) -> BTreeSet<MenuCategory> {
    items.iter().map(|item| item.category).collect()
}

/// Stable sort by price, a missing price sorts as zero
pub fn sort_by_price(items: &[MenuItem], order: SortOrder) -> Vec<MenuItem> {
    let mut sorted = items.to_vec();
    match order {
        SortOrder::Asc => sorted.sort_by_key(MenuItem::price_or_zero),
        SortOrder::Desc => sorted.sort_by(|a, b| b.price_or_zero().cmp(&a.price_or_zero())),
    }
    sorted
}

pub fn count_by_category(items: &[MenuItem], filter: CategoryFilter) -> usize {
    items
        .iter()
        .filter(|item| filter.matches(item.category))
        .count()
}

/// Mean price per category over priced items only.
///
/// Categories without any priced item are absent from the result. Sums
/// saturate at the `Decimal` bounds instead of overflowing.
pub fn average_price_by_category(items: &[MenuItem]) -> BTreeMap<MenuCategory, Decimal> {
    let mut sums: BTreeMap<MenuCategory, (Decimal, u32)> = BTreeMap::new();
    for item in items {
        if let Some(price) = item.price {
            let entry = sums.entry(item.category).or_insert((Decimal::ZERO, 0));
            entry.0 = entry.0.saturating_add(price);
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(category, (sum, count))| (category, sum / Decimal::from(count)))
        .collect()
}

/// Guest-side menu filter: category first, then free-text search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub category: CategoryFilter,
    pub query: String,
}

/// "Showing `shown` of `total` items"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl MenuFilter {
    pub fn new(category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    pub fn apply(&self, items: &[MenuItem]) -> Vec<MenuItem> {
        let by_category = filter_by_category(items, self.category);
        search(&by_category, &self.query)
    }

    pub fn apply_with_summary(&self, items: &[MenuItem]) -> (Vec<MenuItem>, FilterSummary) {
        let shown = self.apply(items);
        let summary = FilterSummary {
            shown: shown.len(),
            total: items.len(),
        };
        (shown, summary)
    }
}
