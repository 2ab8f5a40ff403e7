//! The JSON order file read by the `delivery` binary.

use domain::{
    Catalog, CatalogItem, InMemoryCatalog, ItemId, Money, OrderBuilder, OrderError, OrderKind,
};
use serde::{Deserialize, Serialize};

/// A catalog plus one order referencing it by item ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFile {
    pub catalog: Vec<CatalogEntry>,
    pub order: OrderSpec,
}

/// One priced catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// The order to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    #[serde(default)]
    pub kind: OrderKind,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub express: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub lines: Vec<LineSpec>,
}

/// A catalog reference and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpec {
    pub item_id: String,
    pub quantity: u32,
}

impl OrderFile {
    /// Builds the catalog, rejecting items with negative prices.
    pub fn catalog(&self) -> Result<InMemoryCatalog, OrderError> {
        self.catalog
            .iter()
            .map(|entry| CatalogItem::new(entry.id.as_str(), entry.name.as_str(), entry.price))
            .collect()
    }

    /// Resolves every line against `catalog` and queues it on a builder.
    ///
    /// Delivery options are only attached to special orders.
    pub fn builder(&self, catalog: &impl Catalog) -> Result<OrderBuilder, OrderError> {
        let spec = &self.order;
        let mut builder = match spec.kind {
            OrderKind::Standard => OrderBuilder::new().kind(OrderKind::Standard),
            OrderKind::Special => OrderBuilder::new()
                .kind(OrderKind::Special)
                .options(domain::DeliveryOptions::new(spec.express, spec.note.clone())),
        };

        if let Some(customer) = &spec.customer {
            builder = builder.customer(customer.as_str());
        }
        if let Some(address) = &spec.address {
            builder = builder.address(address.as_str());
        }

        for line in &spec.lines {
            let item = catalog.require(&ItemId::new(line.item_id.as_str()))?;
            builder = builder.add(item, line.quantity);
        }

        Ok(builder)
    }
}
