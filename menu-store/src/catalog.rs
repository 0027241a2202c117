//! Catalog persistence
//!
//! The whole catalog is one JSON array stored under [`MENU_ITEMS_KEY`].
//! Every mutation reads the full array, transforms it and writes it back.
//! Calls are expected to be issued one at a time; there is no locking
//! around the read-modify-write cycle.

use crate::config::StoreConfig;
use crate::storage::{MenuStorage, StorageError};
use chrono::Utc;
use shared::models::{MenuItem, MenuItemDraft, MenuItemFields};
use shared::util::new_item_id;
use thiserror::Error;

/// Slot holding the serialized catalog
pub const MENU_ITEMS_KEY: &str = "menu_items";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Stored catalog is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Menu item not found: {0}")]
    ItemNotFound(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Create-or-update decision of the add/edit flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update(String),
}

impl EditMode {
    /// Derive the mode from the optional item handed to the edit screen
    pub fn from_context(item: Option<&MenuItem>) -> Self {
        match item {
            Some(item) => EditMode::Update(item.id.clone()),
            None => EditMode::Create,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, EditMode::Create)
    }
}

/// Menu catalog stored in a single key-value slot
#[derive(Clone)]
pub struct MenuCatalog {
    storage: MenuStorage,
}

impl MenuCatalog {
    pub fn new(storage: MenuStorage) -> Self {
        Self { storage }
    }

    /// Open (or create) the database file named by the config
    pub fn open(config: &StoreConfig) -> CatalogResult<Self> {
        let path = config.db_path();
        tracing::info!(path = %path.display(), "Opening menu catalog");
        Ok(Self::new(MenuStorage::open(path)?))
    }

    pub fn storage(&self) -> &MenuStorage {
        &self.storage
    }

    /// Load the catalog, degrading any failure to an empty list.
    ///
    /// Rendering paths use this; mutations go through [`Self::try_load_all`].
    pub fn load_all(&self) -> Vec<MenuItem> {
        match self.try_load_all() {
            Ok(items) => items,
            Err(CatalogError::Corrupt(e)) => {
                tracing::warn!(error = %e, "Stored catalog could not be parsed, showing empty menu");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load menu items");
                Vec::new()
            }
        }
    }

    /// Load the catalog; an unwritten slot is an empty catalog, unparsable data is an error
    pub fn try_load_all(&self) -> CatalogResult<Vec<MenuItem>> {
        let Some(bytes) = self.storage.read_slot(MENU_ITEMS_KEY)? else {
            tracing::debug!("No stored catalog yet");
            return Ok(Vec::new());
        };

        let items: Vec<MenuItem> = serde_json::from_slice(&bytes).map_err(CatalogError::Corrupt)?;
        tracing::debug!(count = items.len(), "Loaded menu items");
        Ok(items)
    }

    /// Replace the stored catalog with `items`
    pub fn save_all(&self, items: &[MenuItem]) -> CatalogResult<()> {
        let bytes = serde_json::to_vec(items).map_err(CatalogError::Serialization)?;
        if let Err(e) = self.storage.write_slot(MENU_ITEMS_KEY, &bytes) {
            tracing::error!(error = %e, count = items.len(), "Failed to save menu items");
            return Err(e.into());
        }
        tracing::debug!(count = items.len(), "Saved menu items");
        Ok(())
    }

    pub fn get(&self, id: &str) -> CatalogResult<Option<MenuItem>> {
        Ok(self.try_load_all()?.into_iter().find(|item| item.id == id))
    }

    /// Update the item whose id matches the draft, otherwise append a new one.
    ///
    /// An update replaces name, description, price and category and keeps
    /// the stored id and creation time. A new item keeps the draft's id and
    /// creation time when given, and gets fresh ones otherwise.
    pub fn upsert(&self, draft: MenuItemDraft) -> CatalogResult<MenuItem> {
        let mut items = self.try_load_all()?;

        // blank ids count as absent
        let draft_id = draft.id.filter(|id| !id.trim().is_empty());
        let existing = draft_id
            .as_deref()
            .and_then(|id| items.iter().position(|item| item.id == id));

        let saved = match existing {
            Some(index) => {
                let item = &mut items[index];
                item.apply(draft.fields);
                tracing::info!(id = %item.id, name = %item.name, "Updated menu item");
                item.clone()
            }
            None => {
                let id = match draft_id {
                    Some(id) => id,
                    None => unique_id(&items),
                };
                let item = MenuItem {
                    id,
                    name: draft.fields.name,
                    description: draft.fields.description,
                    price: draft.fields.price,
                    category: draft.fields.category,
                    created_at: draft.created_at.unwrap_or_else(Utc::now),
                };
                tracing::info!(id = %item.id, name = %item.name, "Added menu item");
                items.push(item.clone());
                item
            }
        };

        self.save_all(&items)?;
        Ok(saved)
    }

    /// Save form output with an explicit create/update decision.
    ///
    /// Updating an id that is no longer stored fails instead of recreating it.
    pub fn save(&self, mode: EditMode, fields: MenuItemFields) -> CatalogResult<MenuItem> {
        match mode {
            EditMode::Create => self.upsert(MenuItemDraft::new(fields)),
            EditMode::Update(id) => {
                let mut items = self.try_load_all()?;
                let item = items
                    .iter_mut()
                    .find(|item| item.id == id)
                    .ok_or(CatalogError::ItemNotFound(id))?;
                item.apply(fields);
                let saved = item.clone();
                self.save_all(&items)?;
                tracing::info!(id = %saved.id, name = %saved.name, "Updated menu item");
                Ok(saved)
            }
        }
    }

    /// Remove the item with `id`; returns whether anything was removed
    pub fn delete_by_id(&self, id: &str) -> CatalogResult<bool> {
        let mut items = self.try_load_all()?;
        let Some(index) = items.iter().position(|item| item.id == id) else {
            tracing::debug!(id, "Delete of unknown menu item ignored");
            return Ok(false);
        };

        let removed = items.remove(index);
        self.save_all(&items)?;
        tracing::info!(id, name = %removed.name, "Deleted menu item");
        Ok(true)
    }
}

/// Fresh id not used by any item in `items`
fn unique_id(items: &[MenuItem]) -> String {
    loop {
        let id = new_item_id();
        if !items.iter().any(|item| item.id == id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::MenuCategory;

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(MenuStorage::open_in_memory().unwrap())
    }

    fn fields(name: &str, category: MenuCategory, price: Option<i64>) -> MenuItemFields {
        MenuItemFields {
            name: name.to_string(),
            description: None,
            price: price.map(Decimal::from),
            category,
        }
    }

    #[test]
    fn test_empty_store_loads_empty() {
        let catalog = catalog();
        assert!(catalog.load_all().is_empty());
        assert!(catalog.try_load_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_payload() {
        let catalog = catalog();
        catalog
            .storage()
            .write_slot(MENU_ITEMS_KEY, b"{not json")
            .unwrap();

        assert!(catalog.load_all().is_empty());
        assert!(matches!(catalog.try_load_all(), Err(CatalogError::Corrupt(_))));
    }

    #[test]
    fn test_mutation_does_not_overwrite_corrupt_store() {
        let catalog = catalog();
        catalog
            .storage()
            .write_slot(MENU_ITEMS_KEY, b"{not json")
            .unwrap();

        let draft = MenuItemDraft::new(fields("Tea", MenuCategory::Beverages, None));
        let result = catalog.upsert(draft);
        assert!(matches!(result, Err(CatalogError::Corrupt(_))));
        assert!(matches!(catalog.delete_by_id("x"), Err(CatalogError::Corrupt(_))));

        let raw = catalog.storage().read_slot(MENU_ITEMS_KEY).unwrap();
        assert_eq!(raw.as_deref(), Some(&b"{not json"[..]));
    }

    #[test]
    fn test_upsert_new_item_assigns_id_and_timestamp() {
        let catalog = catalog();
        let before = Utc::now();

        let item = catalog
            .upsert(MenuItemDraft::new(fields("Burger", MenuCategory::Mains, Some(95))))
            .unwrap();

        assert!(!item.id.is_empty());
        assert!(item.created_at >= before);
        assert_eq!(catalog.load_all(), vec![item]);
    }

    #[test]
    fn test_upsert_unknown_id_appends_with_that_id() {
        let catalog = catalog();
        let item = catalog
            .upsert(MenuItemDraft::with_id(
                "legacy-1",
                fields("Soup", MenuCategory::Appetizers, None),
            ))
            .unwrap();
        assert_eq!(item.id, "legacy-1");
        assert_eq!(catalog.load_all().len(), 1);
    }

    #[test]
    fn test_upsert_blank_id_gets_fresh_id() {
        let catalog = catalog();

        let empty = catalog
            .upsert(MenuItemDraft::with_id("", fields("Soup", MenuCategory::Appetizers, None)))
            .unwrap();
        let blank = catalog
            .upsert(MenuItemDraft::with_id("   ", fields("Tea", MenuCategory::Beverages, None)))
            .unwrap();

        assert!(empty.id.parse::<i64>().is_ok());
        assert!(blank.id.parse::<i64>().is_ok());
        assert_ne!(empty.id, blank.id);

        let items = catalog.load_all();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| !item.id.trim().is_empty()));
    }

    #[test]
    fn test_upsert_existing_id_keeps_identity() {
        let catalog = catalog();
        let original = catalog
            .upsert(MenuItemDraft::new(fields("Burger", MenuCategory::Mains, Some(95))))
            .unwrap();

        let mut draft = MenuItemDraft::with_id(
            original.id.clone(),
            fields("Veggie Burger", MenuCategory::Mains, Some(85)),
        );
        draft.created_at = Some(Utc::now() + chrono::Duration::days(1));
        let updated = catalog.upsert(draft).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "Veggie Burger");
        assert_eq!(catalog.load_all(), vec![updated]);
    }

    #[test]
    fn test_save_with_edit_mode() {
        let catalog = catalog();
        let created = catalog
            .save(EditMode::Create, fields("Cake", MenuCategory::Desserts, Some(40)))
            .unwrap();

        let mode = EditMode::from_context(Some(&created));
        assert_eq!(mode, EditMode::Update(created.id.clone()));

        let updated = catalog
            .save(mode, fields("Chocolate Cake", MenuCategory::Desserts, Some(45)))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(catalog.load_all().len(), 1);

        let missing = catalog.save(
            EditMode::Update("gone".to_string()),
            fields("Ghost", MenuCategory::Mains, None),
        );
        assert!(matches!(missing, Err(CatalogError::ItemNotFound(id)) if id == "gone"));
        assert_eq!(catalog.load_all().len(), 1);
        assert!(EditMode::from_context(None).is_create());
    }

    #[test]
    fn test_delete_by_id() {
        let catalog = catalog();
        let a = catalog
            .upsert(MenuItemDraft::with_id("a", fields("A", MenuCategory::Mains, None)))
            .unwrap();
        catalog
            .upsert(MenuItemDraft::with_id("b", fields("B", MenuCategory::Mains, None)))
            .unwrap();

        assert!(!catalog.delete_by_id("zzz").unwrap());
        assert_eq!(catalog.load_all().len(), 2);

        assert!(catalog.delete_by_id("b").unwrap());
        assert_eq!(catalog.load_all(), vec![a]);
        assert_eq!(catalog.get("b").unwrap(), None);
    }

    #[test]
    fn test_unique_id_is_numeric() {
        let items: Vec<MenuItem> = Vec::new();
        let id = unique_id(&items);
        assert!(id.parse::<i64>().is_ok());
    }
}
