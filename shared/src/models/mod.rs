//! Data models
//!
//! Shared between the catalog store and the application shell.
//! Item IDs are opaque strings; new ones are decimal snowflake IDs.

pub mod category;
pub mod menu_item;

// Re-exports
pub use category::*;
pub use menu_item::*;
