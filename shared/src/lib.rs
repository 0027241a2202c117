//! Shared types for the menu catalog
//!
//! Domain models and small utilities used across crates.

pub mod models;
pub mod util;

// Re-exports
pub use models::{CategoryFilter, MenuCategory, MenuItem, MenuItemDraft, MenuItemFields};
pub use serde::{Deserialize, Serialize};
