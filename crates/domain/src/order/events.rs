//! Order lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus};

/// Emitted when an order moves to a different status.
///
/// Never produced for the `Completed -> Completed` self-loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChanged {
    /// The order whose status changed.
    pub order_id: OrderId,

    /// Status before the transition.
    pub previous: OrderStatus,

    /// Status after the transition.
    pub current: OrderStatus,

    /// When the transition happened.
    pub changed_at: DateTime<Utc>,
}

impl StatusChanged {
    /// Creates a status change stamped with the current time.
    pub fn new(order_id: OrderId, previous: OrderStatus, current: OrderStatus) -> Self {
        Self {
            order_id,
            previous,
            current,
            changed_at: Utc::now(),
        }
    }

    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self.current {
            OrderStatus::Preparing => "OrderPreparing",
            OrderStatus::Delivering => "OrderDelivering",
            OrderStatus::Completed => "OrderCompleted",
        }
    }
}
