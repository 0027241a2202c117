//! # menu-store
//!
//! Local restaurant menu catalog.
//!
//! ## Scope
//!
//! - [`catalog`]: load/save the whole catalog as one JSON slot, upsert, delete
//! - [`query`]: search, category filtering/grouping, price sorting, averages
//! - [`price`]: currency formatting, lenient parsing, input validation
//! - [`form`]: add/edit form validation before anything is persisted
//!
//! Screens, navigation and dialogs live in the application shell.
//!
//! ## Example
//!
//! ```ignore
//! use menu_store::{EditMode, MenuCatalog, MenuItemForm, StoreConfig, query};
//!
//! let config = menu_store::setup_environment()?;
//! let catalog = MenuCatalog::open(&config)?;
//!
//! let fields = form.validate()?;
//! catalog.save(EditMode::from_context(editing.as_ref()), fields)?;
//!
//! let items = catalog.load_all();
//! let mains = query::filter_by_category(&items, MenuCategory::Mains.into());
//! ```

pub mod catalog;
pub mod config;
pub mod form;
pub mod logger;
pub mod price;
pub mod query;
pub mod storage;

// Re-exports
pub use catalog::{CatalogError, CatalogResult, EditMode, MENU_ITEMS_KEY, MenuCatalog};
pub use config::StoreConfig;
pub use form::{MenuItemForm, ValidationError};
pub use query::{FilterSummary, MenuFilter, SortOrder};
pub use shared::models::{
    CategoryFilter, MenuCategory, MenuItem, MenuItemDraft, MenuItemFields, ParseCategoryError,
};
pub use storage::{MenuStorage, StorageError, StorageResult};

/// Load `.env`, create the data directory and initialize logging
pub fn setup_environment() -> std::io::Result<StoreConfig> {
    dotenv::dotenv().ok();

    let config = StoreConfig::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::info!(data_dir = %config.data_dir.display(), "Menu store environment ready");

    Ok(config)
}
