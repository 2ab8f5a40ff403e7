//! Domain layer for the delivery ordering engine.
//!
//! This crate provides:
//! - Catalog items, order lines and exact-decimal money
//! - The order entity with its `Preparing -> Delivering -> Completed` lifecycle
//! - Status change observers with isolated failures
//! - The order factory and builder
//! - Catalog lookup by item ID

pub mod catalog;
pub mod order;

pub use catalog::{Catalog, InMemoryCatalog};
pub use order::{
    AdvanceOutcome, CatalogItem, DeliveryOptions, ItemId, LoggingObserver, Money,
    NotificationReport, ObserverError, ObserverFailure, ObserverHandle, ObserverRegistry, Order,
    OrderBuilder, OrderError, OrderId, OrderKind, OrderLine, OrderObserver, OrderStatus,
    StatusChanged, UNKNOWN, create_order,
};
