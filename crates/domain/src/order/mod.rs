//! Order entity, fulfillment lifecycle and related types.

mod events;
mod factory;
mod lifecycle;
mod observer;
mod state;
mod value_objects;

pub use events::StatusChanged;
pub use factory::{OrderBuilder, OrderKind, UNKNOWN, create_order};
pub use lifecycle::{AdvanceOutcome, Order};
pub use observer::{
    LoggingObserver, NotificationReport, ObserverError, ObserverFailure, ObserverHandle,
    ObserverRegistry, OrderObserver,
};
pub use state::OrderStatus;
pub use value_objects::{CatalogItem, DeliveryOptions, ItemId, Money, OrderId, OrderLine};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid price.
    #[error("Invalid price: {price} (must be between $0.00 and {max})", max = Money::MAX)]
    InvalidPrice { price: Money },

    /// An amount would grow past `Money::MAX`.
    #[error("Amount overflow: {what} would exceed {max}", max = Money::MAX)]
    AmountOverflow { what: &'static str },

    /// The order's status does not allow the action.
    #[error("Invalid state transition: cannot {action} in {current_state} status")]
    InvalidStateTransition {
        current_state: OrderStatus,
        action: &'static str,
    },

    /// Item not found in the catalog.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: String },
}

impl OrderError {
    /// Returns a short, stable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::InvalidQuantity { .. } => "InvalidQuantity",
            OrderError::InvalidPrice { .. } => "InvalidPrice",
            OrderError::AmountOverflow { .. } => "AmountOverflow",
            OrderError::InvalidStateTransition { .. } => "InvalidStateTransition",
            OrderError::ItemNotFound { .. } => "ItemNotFound",
        }
    }
}
