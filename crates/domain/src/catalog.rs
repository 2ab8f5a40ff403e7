//! Catalog lookup used to resolve item IDs into priced items.

use std::collections::HashMap;

use crate::order::{CatalogItem, ItemId, OrderError};

/// Source of catalog items, keyed by item ID.
pub trait Catalog {
    /// Looks up an item by ID.
    fn find(&self, id: &ItemId) -> Option<CatalogItem>;

    /// Looks up an item, failing with `ItemNotFound` if it is missing.
    fn require(&self, id: &ItemId) -> Result<CatalogItem, OrderError> {
        self.find(id).ok_or_else(|| OrderError::ItemNotFound {
            item_id: id.to_string(),
        })
    }
}

/// Catalog held in memory, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, returning the item it replaced if the ID was taken.
    pub fn insert(&mut self, item: CatalogItem) -> Option<CatalogItem> {
        match self.index.get(item.id()) {
            Some(&pos) => Some(std::mem::replace(&mut self.items[pos], item)),
            None => {
                self.index.insert(item.id().clone(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    /// Returns all items in insertion order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<CatalogItem> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

impl Catalog for InMemoryCatalog {
    fn find(&self, id: &ItemId) -> Option<CatalogItem> {
        self.index.get(id).map(|&pos| self.items[pos].clone())
    }
}
